//! Mood history buckets and the ledger merge algorithm.

use serde::{Deserialize, Serialize};

/// Default retention bound for the mood history facet.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Aggregated count of one emotion on one calendar day.
///
/// At most one bucket exists per `(date, emotion)` pair; `count` is the
/// number of analysis events with that emotion on that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBucket {
    /// Calendar day, `%Y-%m-%d`.
    pub date: String,
    pub emotion: String,
    pub count: u32,
}

/// Merges one emotion observation into a mood history in place.
///
/// If a bucket with the same `(date, emotion)` pair exists its count is
/// incremented; otherwise a new bucket with count 1 is appended. Matching is
/// exact string equality on both fields - no case folding. When the merged
/// history exceeds `limit`, the oldest bucket (index 0) is evicted.
pub fn merge_observation(history: &mut Vec<MoodBucket>, date: &str, emotion: &str, limit: usize) {
    match history
        .iter_mut()
        .find(|b| b.date == date && b.emotion == emotion)
    {
        Some(bucket) => bucket.count += 1,
        None => history.push(MoodBucket {
            date: date.to_string(),
            emotion: emotion.to_string(),
            count: 1,
        }),
    }

    if history.len() > limit {
        history.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_observations_share_one_bucket() {
        let mut history = Vec::new();
        for _ in 0..5 {
            merge_observation(&mut history, "2024-03-01", "Happy", DEFAULT_HISTORY_LIMIT);
        }
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].count, 5);
    }

    #[test]
    fn test_distinct_emotions_get_distinct_buckets() {
        let mut history = Vec::new();
        merge_observation(&mut history, "2024-03-01", "Happy", DEFAULT_HISTORY_LIMIT);
        merge_observation(&mut history, "2024-03-01", "Sad", DEFAULT_HISTORY_LIMIT);
        merge_observation(&mut history, "2024-03-02", "Happy", DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|b| b.count == 1));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut history = Vec::new();
        merge_observation(&mut history, "2024-03-01", "Happy", DEFAULT_HISTORY_LIMIT);
        merge_observation(&mut history, "2024-03-01", "happy", DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_oldest_bucket_evicted_past_limit() {
        let mut history = Vec::new();
        for day in 0..4 {
            merge_observation(&mut history, &format!("2024-03-{:02}", day + 1), "Calm", 3);
        }
        assert_eq!(history.len(), 3);
        // The first inserted bucket is gone, the most recent is present.
        assert!(!history.iter().any(|b| b.date == "2024-03-01"));
        assert!(history.iter().any(|b| b.date == "2024-03-04"));
    }

    #[test]
    fn test_increment_does_not_evict_below_limit() {
        let mut history = Vec::new();
        merge_observation(&mut history, "2024-03-01", "Calm", 2);
        merge_observation(&mut history, "2024-03-02", "Calm", 2);
        merge_observation(&mut history, "2024-03-02", "Calm", 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].count, 2);
    }
}

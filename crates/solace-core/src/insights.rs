//! Dashboard statistics derived from the mood history.
//!
//! Pure aggregation - nothing here touches persistence. The orchestration
//! layer loads the mood history facet and hands it to [`derive`].

use crate::profile::MoodBucket;

/// How many trailing buckets feed the daily trend.
const TREND_BUCKET_WINDOW: usize = 20;

/// How many trailing date groups the daily trend keeps.
const TREND_DAY_WINDOW: usize = 7;

/// Derived statistics over a user's mood history.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodInsights {
    /// Per-emotion summed counts, descending by count. The underlying sort is
    /// stable, so emotions with equal counts keep first-appearance order.
    pub mood_counts: Vec<(String, u32)>,
    /// Emotion with the highest summed count; `None` on an empty history.
    pub top_mood: Option<String>,
    /// Sum of all counts across all emotions.
    pub total: u32,
    /// `(date, count)` pairs: the last 20 buckets re-grouped by date,
    /// trimmed to the last 7 date groups.
    pub daily_trend: Vec<(String, u32)>,
}

impl MoodInsights {
    /// Fraction of all observations carrying `emotion`, in `[0, 1]`.
    ///
    /// `None` when the history is empty (`total == 0`) or the emotion never
    /// appears.
    pub fn share(&self, emotion: &str) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        self.mood_counts
            .iter()
            .find(|(e, _)| e == emotion)
            .map(|(_, count)| f64::from(*count) / f64::from(self.total))
    }
}

/// Derives dashboard statistics from a mood history.
pub fn derive(history: &[MoodBucket]) -> MoodInsights {
    // Sum counts per emotion, keeping first-appearance order for stable ties.
    let mut mood_counts: Vec<(String, u32)> = Vec::new();
    for bucket in history {
        match mood_counts.iter_mut().find(|(e, _)| *e == bucket.emotion) {
            Some((_, count)) => *count += bucket.count,
            None => mood_counts.push((bucket.emotion.clone(), bucket.count)),
        }
    }
    mood_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let top_mood = mood_counts.first().map(|(e, _)| e.clone());
    let total = mood_counts.iter().map(|(_, c)| c).sum();

    // Last N buckets in ledger order, re-grouped by date.
    let tail_start = history.len().saturating_sub(TREND_BUCKET_WINDOW);
    let mut daily: Vec<(String, u32)> = Vec::new();
    for bucket in &history[tail_start..] {
        match daily.iter_mut().find(|(d, _)| *d == bucket.date) {
            Some((_, count)) => *count += bucket.count,
            None => daily.push((bucket.date.clone(), bucket.count)),
        }
    }
    let day_start = daily.len().saturating_sub(TREND_DAY_WINDOW);
    let daily_trend = daily.split_off(day_start);

    MoodInsights {
        mood_counts,
        top_mood,
        total,
        daily_trend,
    }
}

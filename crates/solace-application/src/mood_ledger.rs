//! Mood ledger service.
//!
//! Binds the pure bucket-merge algorithm to the clock and the profile
//! repository: one `record` call folds one emotion observation into the
//! user's bounded mood history facet.

use solace_core::error::Result;
use solace_core::insights::{self, MoodInsights};
use solace_core::profile::{merge_observation, ProfileRepository, DEFAULT_HISTORY_LIMIT};
use std::sync::Arc;

/// Aggregates emotion observations into the per-user mood history.
pub struct MoodLedger {
    profiles: Arc<dyn ProfileRepository>,
    history_limit: usize,
}

impl MoodLedger {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            profiles,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Overrides the retention bound.
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Records one observation of `emotion` for `user_id` under today's date.
    ///
    /// Load-merge-write on the mood history facet; the facet-write
    /// consistency contract applies.
    pub async fn record(&self, user_id: &str, emotion: &str) -> Result<()> {
        let mut history = self.profiles.load(user_id).await.mood_history;
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        merge_observation(&mut history, &today, emotion, self.history_limit);
        tracing::debug!("Recorded mood '{}' for '{}'", emotion, user_id);
        self.profiles.update_mood_history(user_id, history).await
    }

    /// Derives dashboard statistics from the user's current mood history.
    pub async fn insights(&self, user_id: &str) -> MoodInsights {
        let history = self.profiles.load(user_id).await.mood_history;
        insights::derive(&history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_infrastructure::JsonProfileRepository;
    use tempfile::TempDir;

    async fn ledger_with_repo(dir: &TempDir) -> (MoodLedger, Arc<JsonProfileRepository>) {
        let repo = Arc::new(JsonProfileRepository::new(dir.path()).await.unwrap());
        (MoodLedger::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_same_day_same_emotion_shares_bucket() {
        let temp_dir = TempDir::new().unwrap();
        let (ledger, repo) = ledger_with_repo(&temp_dir).await;

        for _ in 0..3 {
            ledger.record("usr_1", "Happy").await.unwrap();
        }

        let history = repo.load("usr_1").await.mood_history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].emotion, "Happy");
        assert_eq!(history[0].count, 3);
    }

    #[tokio::test]
    async fn test_distinct_emotions_get_own_buckets() {
        let temp_dir = TempDir::new().unwrap();
        let (ledger, repo) = ledger_with_repo(&temp_dir).await;

        ledger.record("usr_1", "Happy").await.unwrap();
        ledger.record("usr_1", "Sad").await.unwrap();

        let history = repo.load("usr_1").await.mood_history;
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_retention_bound_evicts_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Arc::new(JsonProfileRepository::new(temp_dir.path()).await.unwrap());
        let ledger = MoodLedger::new(repo.clone()).with_history_limit(2);

        ledger.record("usr_1", "Happy").await.unwrap();
        ledger.record("usr_1", "Sad").await.unwrap();
        ledger.record("usr_1", "Calm").await.unwrap();

        let history = repo.load("usr_1").await.mood_history;
        assert_eq!(history.len(), 2);
        assert!(!history.iter().any(|b| b.emotion == "Happy"));
        assert!(history.iter().any(|b| b.emotion == "Calm"));
    }

    #[tokio::test]
    async fn test_insights_reflect_history() {
        let temp_dir = TempDir::new().unwrap();
        let (ledger, _repo) = ledger_with_repo(&temp_dir).await;

        ledger.record("usr_1", "Happy").await.unwrap();
        ledger.record("usr_1", "Happy").await.unwrap();
        ledger.record("usr_1", "Sad").await.unwrap();

        let insights = ledger.insights("usr_1").await;
        assert_eq!(insights.top_mood.as_deref(), Some("Happy"));
        assert_eq!(insights.total, 3);
    }
}

//! JSON-file ProfileRepository implementation.
//!
//! One document per user at `<base_dir>/<user_id>.json`. Reads are
//! infallible: a missing or unreadable document yields the default-shaped
//! record, and the facet-repair in `UserRecord`'s serde defaults fills any
//! facet an older document lacks.

use anyhow::{Context, Result};
use async_trait::async_trait;
use solace_core::error::Result as SolaceResult;
use solace_core::profile::{ProfileRepository, UserRecord};
use solace_core::SolaceError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed profile repository.
pub struct JsonProfileRepository {
    base_dir: PathBuf,
}

impl JsonProfileRepository {
    /// Creates a repository at the default location
    /// (`~/.local/share/solace/profiles`).
    pub async fn default_location() -> Result<Self> {
        let base_dir = crate::paths::SolacePaths::profiles_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get profiles directory: {}", e))?;
        Self::new(base_dir).await
    }

    /// Creates a repository rooted at `base_dir`, creating it if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .await
            .context("Failed to create profiles directory")?;
        Ok(Self { base_dir })
    }

    fn document_path(&self, user_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", user_id))
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load(&self, user_id: &str) -> UserRecord {
        let path = self.document_path(user_id);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(_) => return UserRecord::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                // Corrupt documents are swallowed, not surfaced.
                tracing::debug!("Unreadable profile document for '{}': {}", user_id, e);
                UserRecord::default()
            }
        }
    }

    async fn save(&self, user_id: &str, record: &UserRecord) -> SolaceResult<()> {
        let path = self.document_path(user_id);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)
            .await
            .map_err(|e| SolaceError::data_access(format!("Failed to write profile: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::profile::{AppearanceSettings, Message, MoodBucket};
    use tempfile::TempDir;

    async fn repository(dir: &TempDir) -> JsonProfileRepository {
        JsonProfileRepository::new(dir.path()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_default_shape() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        let record = repo.load("nobody").await;
        assert!(record.messages.is_empty());
        assert!(record.journal.is_empty());
        assert!(record.mood_history.is_empty());
        assert_eq!(record.settings, AppearanceSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        let mut record = UserRecord::default();
        record.messages.push(Message::user("hello"));
        record.mood_history.push(MoodBucket {
            date: "2024-03-01".to_string(),
            emotion: "Happy".to_string(),
            count: 2,
        });

        repo.save("usr_1", &record).await.unwrap();
        let loaded = repo.load("usr_1").await;
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_corrupt_document_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        std::fs::write(temp_dir.path().join("usr_1.json"), "{not json").unwrap();
        let record = repo.load("usr_1").await;
        assert_eq!(record, UserRecord::default());
    }

    #[tokio::test]
    async fn test_partial_document_repaired_on_read() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        std::fs::write(
            temp_dir.path().join("usr_1.json"),
            r#"{"journal": [{"id": "j1", "title": "T", "content": "C", "date": "Mar 1, 2024"}]}"#,
        )
        .unwrap();

        let record = repo.load("usr_1").await;
        assert_eq!(record.journal.len(), 1);
        assert!(record.messages.is_empty());
        assert!(record.mood_history.is_empty());
        assert_eq!(record.settings, AppearanceSettings::default());
    }

    #[tokio::test]
    async fn test_facet_write_visible_on_next_read() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        repo.update_messages("usr_1", vec![Message::user("first")])
            .await
            .unwrap();
        let loaded = repo.load("usr_1").await;
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(loaded.messages[0].text, "first");
    }

    #[tokio::test]
    async fn test_facet_write_preserves_other_facets() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        repo.update_messages("usr_1", vec![Message::user("kept")])
            .await
            .unwrap();
        repo.update_mood_history(
            "usr_1",
            vec![MoodBucket {
                date: "2024-03-01".to_string(),
                emotion: "Calm".to_string(),
                count: 1,
            }],
        )
        .await
        .unwrap();

        let loaded = repo.load("usr_1").await;
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(loaded.mood_history.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_empty_shape() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir).await;

        repo.update_messages("usr_1", vec![Message::user("bye")])
            .await
            .unwrap();
        repo.reset("usr_1").await.unwrap();

        let loaded = repo.load("usr_1").await;
        assert_eq!(loaded, UserRecord::default());
    }
}

//! Profile repository trait.
//!
//! Defines the interface for per-user profile persistence.

use super::model::{AppearanceSettings, JournalEntry, UserRecord};
use super::{Message, MoodBucket};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the per-user profile document.
///
/// Implementations persist one document per user id. Reads are infallible by
/// contract: a missing or unreadable document yields the default-shaped
/// record, never an error.
///
/// # Consistency
///
/// Each facet update is a read-then-write (`load`, replace one facet, `save`)
/// with no isolation. Concurrent writers touching *different* facets of the
/// same user do not corrupt each other; concurrent writers on the *same*
/// facet are last-write-wins - a writer holding a stale read silently
/// discards the other's update. Callers that need stronger guarantees must
/// serialize their own writes.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the full record for a user.
    ///
    /// Never fails: missing and corrupt documents both yield
    /// `UserRecord::default()`.
    async fn load(&self, user_id: &str) -> UserRecord;

    /// Saves the full record, unconditionally overwriting all facets.
    async fn save(&self, user_id: &str, record: &UserRecord) -> Result<()>;

    /// Replaces the messages facet.
    async fn update_messages(&self, user_id: &str, messages: Vec<Message>) -> Result<()> {
        let mut record = self.load(user_id).await;
        record.messages = messages;
        self.save(user_id, &record).await
    }

    /// Replaces the journal facet.
    async fn update_journal(&self, user_id: &str, journal: Vec<JournalEntry>) -> Result<()> {
        let mut record = self.load(user_id).await;
        record.journal = journal;
        self.save(user_id, &record).await
    }

    /// Replaces the appearance settings facet.
    async fn update_settings(&self, user_id: &str, settings: AppearanceSettings) -> Result<()> {
        let mut record = self.load(user_id).await;
        record.settings = settings;
        self.save(user_id, &record).await
    }

    /// Replaces the mood history facet.
    async fn update_mood_history(&self, user_id: &str, history: Vec<MoodBucket>) -> Result<()> {
        let mut record = self.load(user_id).await;
        record.mood_history = history;
        self.save(user_id, &record).await
    }

    /// Resets the record to the empty-facets shape.
    ///
    /// The identity itself is untouched; only the profile data is cleared.
    async fn reset(&self, user_id: &str) -> Result<()> {
        self.save(user_id, &UserRecord::default()).await
    }
}

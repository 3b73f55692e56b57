//! User profile record and its thin facets.

use super::message::Message;
use super::mood::MoodBucket;
use serde::{Deserialize, Serialize};

/// Appearance customization for the companion character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub color: String,
    pub accessory: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            color: "sky".to_string(),
            accessory: "none".to_string(),
        }
    }
}

/// A private journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Calendar date the entry was written (display string).
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

/// The single persisted document per user.
///
/// Every facet carries `#[serde(default)]` so a stored document missing a
/// facet (written by an older build, or hand-edited) deserializes into a
/// fully-shaped record. Readers never see a partially-shaped record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub settings: AppearanceSettings,
    #[serde(default)]
    pub mood_history: Vec<MoodBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_has_all_facets() {
        let record = UserRecord::default();
        assert!(record.messages.is_empty());
        assert!(record.journal.is_empty());
        assert!(record.mood_history.is_empty());
        assert_eq!(record.settings.color, "sky");
        assert_eq!(record.settings.accessory, "none");
    }

    #[test]
    fn test_missing_facets_are_defaulted() {
        // A document written before mood tracking existed.
        let json = r#"{"messages": [{"id": "1", "role": "user", "text": "hi", "timestamp": "2024-01-01T00:00:00Z"}]}"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.messages.len(), 1);
        assert!(record.journal.is_empty());
        assert!(record.mood_history.is_empty());
        assert_eq!(record.settings, AppearanceSettings::default());
    }
}

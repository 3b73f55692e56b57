//! Conversation message types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the companion.
    Companion,
}

impl MessageRole {
    /// The role string expected by the generative service wire format.
    pub fn wire_role(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Companion => "model",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Companion => write!(f, "companion"),
        }
    }
}

/// A single message in the conversation transcript.
///
/// Messages are append-only from the orchestrator's perspective; transcript
/// order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: String,
}

impl Message {
    /// Creates a user message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    /// Creates a companion message stamped now.
    pub fn companion(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Companion, text)
    }

    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roles() {
        assert_eq!(MessageRole::User.wire_role(), "user");
        assert_eq!(MessageRole::Companion.wire_role(), "model");
    }

    #[test]
    fn test_constructors_assign_ids() {
        let a = Message::user("hello");
        let b = Message::companion("hi");
        assert_eq!(a.role, MessageRole::User);
        assert_eq!(b.role, MessageRole::Companion);
        assert_ne!(a.id, b.id);
    }
}

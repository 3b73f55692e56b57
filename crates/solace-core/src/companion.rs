//! Generative companion service trait.

use crate::error::Result;
use crate::profile::Message;
use async_trait::async_trait;

/// An abstract generative chat service producing companion replies.
///
/// The request carries the ordered transcript so far plus the new user
/// utterance; implementations add their own behavioral system instruction.
#[async_trait]
pub trait CompanionResponder: Send + Sync {
    /// Produces a reply to `user_input` given the prior transcript.
    ///
    /// Implementations must map an empty service response to a non-empty
    /// fallback string rather than returning empty text.
    async fn reply(&self, history: &[Message], user_input: &str) -> Result<String>;
}

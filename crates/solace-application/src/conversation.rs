//! Conversation orchestrator.
//!
//! Owns the per-user transcript: appends user turns, fetches companion
//! replies from the generative service, and splices in synthetic messages
//! when the sensing pipeline detects an emotion.

use solace_core::companion::CompanionResponder;
use solace_core::error::Result;
use solace_core::profile::{Message, ProfileRepository};
use solace_core::sensing::EmotionReading;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Greeting seeded into an empty transcript.
const WELCOME_TEXT: &str =
    "Welcome back to your sanctuary. I'm here to listen. How are you feeling in this moment?";

/// Orchestrates the conversation transcript for one user session.
pub struct ConversationService {
    user_id: String,
    profiles: Arc<dyn ProfileRepository>,
    responder: Arc<dyn CompanionResponder>,
    /// True while a companion reply is being generated.
    composing: AtomicBool,
}

impl ConversationService {
    pub fn new(
        user_id: impl Into<String>,
        profiles: Arc<dyn ProfileRepository>,
        responder: Arc<dyn CompanionResponder>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            profiles,
            responder,
            composing: AtomicBool::new(false),
        }
    }

    /// Whether a companion reply is currently being generated.
    pub fn is_composing(&self) -> bool {
        self.composing.load(Ordering::SeqCst)
    }

    /// Returns the current transcript.
    pub async fn transcript(&self) -> Vec<Message> {
        self.profiles.load(&self.user_id).await.messages
    }

    /// Seeds the greeting into an empty transcript and returns the
    /// transcript either way.
    pub async fn ensure_welcome(&self) -> Result<Vec<Message>> {
        let mut messages = self.transcript().await;
        if messages.is_empty() {
            messages.push(Message::companion(WELCOME_TEXT));
            self.profiles
                .update_messages(&self.user_id, messages.clone())
                .await?;
        }
        Ok(messages)
    }

    /// Appends a user turn and requests a companion reply.
    ///
    /// The user message is persisted before the service call. A failed
    /// completion appends nothing - no reply and no error message; callers
    /// observe only the composing flag clearing.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))`: The companion reply that was appended
    /// - `Ok(None)`: Empty input, or the completion failed
    pub async fn send_user_message(&self, text: &str) -> Result<Option<Message>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let mut messages = self.transcript().await;
        let prior = messages.clone();
        messages.push(Message::user(text));
        self.profiles
            .update_messages(&self.user_id, messages.clone())
            .await?;

        self.composing.store(true, Ordering::SeqCst);
        let reply = self.responder.reply(&prior, text).await;
        self.composing.store(false, Ordering::SeqCst);

        match reply {
            Ok(reply_text) => {
                let companion_message = Message::companion(reply_text);
                messages.push(companion_message.clone());
                self.profiles
                    .update_messages(&self.user_id, messages)
                    .await?;
                Ok(Some(companion_message))
            }
            Err(e) => {
                tracing::warn!("Companion reply failed, dropping turn: {}", e);
                Ok(None)
            }
        }
    }

    /// Appends a synthetic companion message for a detected emotion.
    ///
    /// Runs independently of any in-flight user send; whichever append
    /// completes first lands first in the transcript.
    pub async fn inject_emotion_message(&self, reading: &EmotionReading) -> Result<Message> {
        let text = format!(
            "I noticed you seem a bit {}. {}",
            reading.emotion.to_lowercase(),
            reading.suggestion
        );
        let emotion_message = Message::companion(text);

        let mut messages = self.transcript().await;
        messages.push(emotion_message.clone());
        self.profiles
            .update_messages(&self.user_id, messages)
            .await?;
        Ok(emotion_message)
    }
}

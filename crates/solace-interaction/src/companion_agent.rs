//! GeminiCompanionAgent - chat completions for the wellbeing companion.
//!
//! Calls the Gemini REST API directly with the full transcript and a fixed
//! behavioral system instruction. Configuration is loaded from secret.json.

use crate::gemini::{post_generate, Content, GenerateContentRequest, GenerationConfig};
use async_trait::async_trait;
use reqwest::Client;
use solace_core::companion::CompanionResponder;
use solace_core::config::CompanionSettings;
use solace_core::error::Result;
use solace_core::profile::Message;
use solace_core::secret::SecretService;
use solace_core::SolaceError;
use solace_infrastructure::SecretServiceImpl;

const SYSTEM_INSTRUCTION: &str = "You are a warm, gentle emotional wellbeing companion. \
Listen closely, validate what the user is feeling, and offer small, concrete comfort - \
a breathing exercise, an affirmation, a soft reflective prompt. \
Stay supportive and non-clinical; never diagnose. \
When the user shares something heavy, acknowledge it before anything else.";

/// Shown in place of a reply when the service returns empty text.
const FALLBACK_REPLY: &str = "I'm here for you. Could you tell me more?";

/// Agent implementation that produces companion replies via the Gemini API.
#[derive(Clone)]
pub struct GeminiCompanionAgent {
    client: Client,
    api_key: String,
    model: String,
    temperature: f64,
}

impl GeminiCompanionAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: CompanionSettings::default().temperature,
        }
    }

    /// Loads credentials from secret.json and applies companion settings.
    pub async fn try_from_secrets(settings: &CompanionSettings) -> Result<Self> {
        let service = SecretServiceImpl::default_location()
            .map_err(|e| SolaceError::config(format!("Failed to locate secret file: {}", e)))?;

        let secret_config = service
            .load_secrets()
            .await
            .map_err(|e| SolaceError::config(format!("Failed to load secret.json: {}", e)))?;

        let gemini_config = secret_config
            .gemini
            .ok_or_else(|| SolaceError::config("Gemini configuration not found in secret.json"))?;

        let model = gemini_config
            .model_name
            .unwrap_or_else(|| settings.model_name.clone());

        Ok(Self::new(gemini_config.api_key, model).with_temperature(settings.temperature))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl CompanionResponder for GeminiCompanionAgent {
    async fn reply(&self, history: &[Message], user_input: &str) -> Result<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content::text(m.role.wire_role(), m.text.clone()))
            .collect();
        contents.push(Content::text("user", user_input));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text("system", SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                response_mime_type: None,
                response_schema: None,
            }),
        };

        let response =
            post_generate(&self.client, "chat", &self.api_key, &self.model, &request).await?;

        let text = response.into_text().unwrap_or_default();
        if text.trim().is_empty() {
            tracing::debug!("Empty chat completion, substituting fallback reply");
            return Ok(FALLBACK_REPLY.to_string());
        }
        Ok(text)
    }
}

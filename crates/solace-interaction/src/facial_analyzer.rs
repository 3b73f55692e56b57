//! GeminiFacialAnalyzer - expression classification over a still frame.
//!
//! Sends the encoded frame as inline data with a JSON-schema constrained
//! response, so a well-formed answer deserializes straight into an
//! [`EmotionReading`]. Anything else is "no result", never an error the
//! pipeline would surface.

use crate::gemini::{
    post_generate, Content, GenerateContentRequest, GenerationConfig, InlineDataPayload, Part,
    DEFAULT_GEMINI_MODEL,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use solace_core::error::Result;
use solace_core::sensing::{CameraFrame, EmotionReading, FacialAnalyzer};

const ANALYSIS_INSTRUCTION: &str = "Analyze the facial expression of the person in this image. \
Identify their primary emotional state (e.g., Happy, Sad, Stressed, Fatigued, Neutral) and \
provide one short, gentle wellbeing suggestion (breathing, affirmation, or physical stretch). \
Return the result as a JSON object with keys: 'emotion', 'confidence' (0-1), and 'suggestion'.";

/// Agent implementation classifying expressions via the Gemini API.
#[derive(Clone)]
pub struct GeminiFacialAnalyzer {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiFacialAnalyzer {
    /// Creates a new analyzer with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates an analyzer on the default model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_GEMINI_MODEL)
    }

    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "emotion": { "type": "STRING" },
                "confidence": { "type": "NUMBER" },
                "suggestion": { "type": "STRING" }
            },
            "required": ["emotion", "confidence", "suggestion"]
        })
    }
}

/// Parses the service's JSON text payload into a reading.
///
/// Missing fields and malformed JSON both yield `None`.
fn parse_reading(text: &str) -> Option<EmotionReading> {
    serde_json::from_str(text).ok()
}

#[async_trait]
impl FacialAnalyzer for GeminiFacialAnalyzer {
    async fn analyze(&self, frame: &CameraFrame) -> Result<Option<EmotionReading>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineDataPayload {
                            mime_type: frame.mime_type.clone(),
                            data: BASE64_STANDARD.encode(&frame.bytes),
                        },
                    },
                    Part::Text {
                        text: ANALYSIS_INSTRUCTION.to_string(),
                    },
                ],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(Self::response_schema()),
            }),
        };

        let response = post_generate(
            &self.client,
            "facial-analysis",
            &self.api_key,
            &self.model,
            &request,
        )
        .await?;

        let reading = response.into_text().as_deref().and_then(parse_reading);
        if reading.is_none() {
            tracing::debug!("Discarding unparsable facial-analysis response");
        }
        Ok(reading)
    }
}

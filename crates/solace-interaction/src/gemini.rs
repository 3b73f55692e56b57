//! Shared Gemini `generateContent` wire types.
//!
//! Both agents in this crate speak the same REST endpoint; this module holds
//! the request/response payloads and the HTTP error mapping they share.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use solace_core::error::Result;
use solace_core::SolaceError;

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub(crate) const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineDataPayload {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Pulls the first text part out of the first candidate, if any.
    pub fn into_text(self) -> Option<String> {
        self.candidates
            .and_then(|mut candidates| candidates.pop())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
    }
}

/// Posts a `generateContent` request and deserializes the response body.
pub(crate) async fn post_generate(
    client: &Client,
    service: &'static str,
    api_key: &str,
    model: &str,
    body: &GenerateContentRequest,
) -> Result<GenerateContentResponse> {
    let url = format!(
        "{}/{model}:generateContent?key={api_key}",
        BASE_URL,
        model = model,
        api_key = api_key
    );

    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|err| SolaceError::service(service, format!("request failed: {err}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(map_http_error(service, status, body_text));
    }

    response
        .json()
        .await
        .map_err(|err| SolaceError::service(service, format!("failed to parse response: {err}")))
}

fn map_http_error(service: &'static str, status: StatusCode, body: String) -> SolaceError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    SolaceError::service(service, format!("HTTP {}: {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_data_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::InlineData {
                    inline_data: InlineDataPayload {
                        mime_type: "image/jpeg".to_string(),
                        data: "QUJD".to_string(),
                    },
                }],
            }],
            system_instruction: None,
            generation_config: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"inlineData\""));
        assert!(json.contains("\"mimeType\":\"image/jpeg\""));
        assert!(!json.contains("system_instruction"));
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("user", "hi")],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: None,
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\""));
    }

    #[test]
    fn test_into_text_extracts_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello there"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("hello there"));
    }

    #[test]
    fn test_into_text_handles_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(response.into_text(), None);

        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(response.into_text(), None);
    }
}

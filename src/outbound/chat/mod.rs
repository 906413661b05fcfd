//! Reqwest-backed adapter for the Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ChatCompletion, ChatCompletionError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generative-text adapter speaking the `models/{model}:generateContent`
/// protocol.
pub struct GeminiChatCompletion {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiChatCompletion {
    /// Build an adapter for one fully resolved `generateContent` endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequestDto<'a> {
    contents: Vec<ContentDto<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentDto<'a> {
    parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
struct PartDto<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateDto {
    #[serde(default)]
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePartDto {
    #[serde(default)]
    text: Option<String>,
}

fn extract_text(response: GenerateContentResponseDto) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;
    let text = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() { None } else { Some(text) }
}

#[async_trait]
impl ChatCompletion for GeminiChatCompletion {
    async fn generate(&self, prompt: &str) -> Result<String, ChatCompletionError> {
        let body = GenerateContentRequestDto {
            contents: vec![ContentDto {
                parts: vec![PartDto { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|error| ChatCompletionError::transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &detail));
        }

        let decoded: GenerateContentResponseDto = response.json().await.map_err(|error| {
            ChatCompletionError::decode(format!("invalid generateContent payload: {error}"))
        })?;
        extract_text(decoded).ok_or_else(|| {
            ChatCompletionError::decode("generateContent response contained no text")
        })
    }
}

fn map_status_error(status: StatusCode, detail: &str) -> ChatCompletionError {
    let message = format!("status {}: {}", status.as_u16(), detail.trim());
    if status.is_client_error() {
        ChatCompletionError::rejected(message)
    } else {
        ChatCompletionError::transport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_concatenated_candidate_text() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "Persondays measure " },
                            { "text": "labour output." }
                        ]
                    }
                }
            ]
        }"#;
        let decoded: GenerateContentResponseDto =
            serde_json::from_str(body).expect("payload should decode");
        assert_eq!(
            extract_text(decoded).as_deref(),
            Some("Persondays measure labour output.")
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let decoded: GenerateContentResponseDto =
            serde_json::from_str(r#"{ "candidates": [] }"#).expect("payload should decode");
        assert_eq!(extract_text(decoded), None);
    }

    #[test]
    fn client_errors_map_to_rejection() {
        let error = map_status_error(StatusCode::FORBIDDEN, "API key invalid");
        assert!(matches!(error, ChatCompletionError::Rejected { .. }));
        assert!(error.to_string().contains("API key invalid"));
    }
}

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    food_analysis::{ports::LLMClient, value_objects::ImagePayload},
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first candidate, all text parts joined. Empty when the
    /// model returned no text, e.g. a blocked candidate.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiLLMClient {
    pub fn new(api_key: String, model_name: String, base_url: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        let text = gemini_response.into_text();
        if text.is_empty() {
            tracing::warn!("Gemini reply carries no text");
        }

        Ok(text)
    }
}

impl LLMClient for GeminiLLMClient {
    #[instrument(skip(self, prompt, image), fields(model = %self.model_name, mime_type = %image.mime_type, size = image.data.len()))]
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image.data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: base64_image,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
        };

        self.call_gemini_api(request).await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_puts_image_before_prompt() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".to_string(),
                            data: "aGk=".to_string(),
                        },
                    },
                    Part::Text {
                        text: "describe".to_string(),
                    },
                ],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "inline_data": { "mime_type": "image/png", "data": "aGk=" } },
                        { "text": "describe" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_reply_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"food\":" }, { "text": " \"Pear\"}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text(), "{\"food\": \"Pear\"}");
    }

    #[test]
    fn test_reply_without_text_is_empty() {
        let response: GeminiResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert_eq!(response.into_text(), "");

        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(response.into_text(), "");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_external_service_error() {
        // Nothing listens on port 9 locally.
        let client = GeminiLLMClient::new(
            "key".to_string(),
            DEFAULT_GEMINI_MODEL.to_string(),
            "http://127.0.0.1:9".to_string(),
        );
        let image = ImagePayload::new(bytes::Bytes::from_static(b"jpeg"), None, None);

        let result = client.generate_with_image("describe".to_string(), image).await;
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }
}

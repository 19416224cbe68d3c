// Gemini generateContent client

use crate::config::GeminiConfig;
use crate::error::{AnalysisError, Result};
use crate::metrics;
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part, SystemInstruction,
};
use crate::prompt::PromptSet;
use crate::provider::{extract_error_message, guard_terse_reply, ImageAnalysisProvider};
use crate::vision::NormalizedImage;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the Gemini generative language API.
///
/// Sends one generateContent request per analysis: system instruction,
/// user instruction, and the creative as tagged inline data. Applies
/// the terse reply guard to the returned text. No retries.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .use_rustls_tls()
            .build()
            .map_err(|e| {
                AnalysisError::Internal(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// The configured API key, required before any network call.
    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AnalysisError::Configuration(
                    "Missing GEMINI_API_KEY environment variable".to_string(),
                )
            })
    }

    fn build_request(&self, prompts: &PromptSet, image: &NormalizedImage) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: prompts.user.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.as_base64(),
                        },
                    },
                ],
            }],
            system_instruction: Some(SystemInstruction::from_text(prompts.system)),
            generation_config: None,
        }
    }
}

#[async_trait]
impl ImageAnalysisProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, prompts: &PromptSet, image: &NormalizedImage) -> Result<String> {
        let api_key = self.api_key()?;
        let request = self.build_request(prompts, image);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );

        debug!("Calling generateContent API for model: {}", self.config.model);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_provider_call("gemini", 0, started.elapsed().as_secs_f64());
                AnalysisError::Provider(format!("HTTP error: {}", e))
            })?;

        let status = response.status();
        metrics::record_provider_call("gemini", status.as_u16(), started.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: HTTP {} - {}", status, error_text);
            let message = extract_error_message(&error_text).unwrap_or(error_text);
            return Err(AnalysisError::Provider(format!("HTTP {}: {}", status, message)));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Provider(format!("Response parsing error: {}", e)))?;

        if let Some(usage) = &generated.usage_metadata {
            metrics::record_tokens(
                "gemini",
                usage.prompt_token_count,
                usage.candidates_token_count,
            );
        }

        let summary = generated.first_candidate_text().ok_or_else(|| {
            AnalysisError::Provider("Provider returned no candidates".to_string())
        })?;

        Ok(guard_terse_reply(
            summary.trim().to_string(),
            &self.config.fallback_phrases,
            &self.config.fallback_summary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn client_without_key() -> GeminiClient {
        GeminiClient::new(&GeminiConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = client_without_key().api_key().unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_request_carries_inline_data_and_system_instruction() {
        let client = client_without_key();
        let prompts = PromptSet {
            system: "system text",
            user: "user text".to_string(),
        };
        let image = NormalizedImage::from_bytes(Bytes::from_static(b"img"), "image/png".to_string());

        let request = client.build_request(&prompts, &image);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "user text");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "aW1n");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "system text");
    }
}

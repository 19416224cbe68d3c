// OpenAI chat completions client

use crate::config::OpenAiConfig;
use crate::error::{AnalysisError, Result};
use crate::metrics;
use crate::models::openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    MessageContent,
};
use crate::prompt::PromptSet;
use crate::provider::{extract_error_message, ImageAnalysisProvider};
use crate::vision::NormalizedImage;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the OpenAI chat completions API.
///
/// Sends one multimodal completion request per analysis: system
/// instruction, user instruction, and the creative as a base64 data
/// URI. No retries; failures surface to the request handler.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
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
                    "Missing OPENAI_API_KEY environment variable".to_string(),
                )
            })
    }

    fn build_request(&self, prompts: &PromptSet, image: &NormalizedImage) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(prompts.system.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: prompts.user.clone(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.as_data_uri(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl ImageAnalysisProvider for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, prompts: &PromptSet, image: &NormalizedImage) -> Result<String> {
        let api_key = self.api_key()?;
        let request = self.build_request(prompts, image);
        let url = format!("{}/chat/completions", self.config.api_base_url);

        debug!("Calling chat completions API for model: {}", self.config.model);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_provider_call("openai", 0, started.elapsed().as_secs_f64());
                AnalysisError::Provider(format!("HTTP error: {}", e))
            })?;

        let status = response.status();
        metrics::record_provider_call("openai", status.as_u16(), started.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error: HTTP {} - {}", status, error_text);
            let message = extract_error_message(&error_text).unwrap_or(error_text);
            return Err(AnalysisError::Provider(format!("HTTP {}: {}", status, message)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Provider(format!("Response parsing error: {}", e)))?;

        if let Some(usage) = &completion.usage {
            metrics::record_tokens("openai", usage.prompt_tokens, usage.completion_tokens);
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AnalysisError::Provider("Provider returned no completion choices".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn client_without_key() -> OpenAiClient {
        OpenAiClient::new(&OpenAiConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = client_without_key().api_key().unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_configuration_error() {
        let config = OpenAiConfig {
            api_key: Some("  ".to_string()),
            ..OpenAiConfig::default()
        };
        let client = OpenAiClient::new(&config).unwrap();
        assert!(client.api_key().is_err());
    }

    #[test]
    fn test_request_carries_both_prompts_and_image() {
        let client = client_without_key();
        let prompts = PromptSet {
            system: "system text",
            user: "user text".to_string(),
        };
        let image = NormalizedImage::from_bytes(Bytes::from_static(b"img"), "image/jpeg".to_string());

        let request = client.build_request(&prompts, &image);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "system text");
        assert_eq!(json["messages"][1]["content"][0]["text"], "user text");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,aW1n"
        );
    }
}

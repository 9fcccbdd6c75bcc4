// OpenAI-compatible chat completions client
// Author: kelexine (https://github.com/kelexine)

use super::models::{ChatCompletionRequest, ChatCompletionResponse};
use super::ApiKey;
use crate::config::OpenAiConfig;
use crate::error::{AnalyzerError, Result};
use crate::utils::logging::scrub;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for an OpenAI-compatible Chat Completions API.
///
/// Built once at startup and passed by reference to whatever needs it. Holds
/// the HTTP connection pool, credentials and the request defaults (model and
/// completion token limit).
#[derive(Debug)]
pub struct VisionClient {
    http_client: Client,
    api_key: ApiKey,
    api_base_url: String,
    model: String,
    max_completion_tokens: u32,
}

impl VisionClient {
    /// Create a new client from configuration.
    ///
    /// Fails when the API key is missing or blank, or when the HTTP client
    /// cannot be constructed. No request is sent here.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ApiKey::new)
            .ok_or(AnalyzerError::MissingApiKey)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| AnalyzerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            api_key,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Get the model requests are sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the completion token limit
    pub fn max_completion_tokens(&self) -> u32 {
        self.max_completion_tokens
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url)
    }

    /// Call the `chat/completions` endpoint (non-streaming).
    ///
    /// Single attempt; failures are returned to the caller as-is.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = self.chat_url();
        debug!("Calling chat completions API for model: {}", request.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            debug!(
                "OpenAI API error: HTTP {} - Response body: {}",
                status,
                scrub(&error_text)
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message: scrub(&message),
            });
        }

        let response_text = response.text().await?;

        debug!(
            "Raw chat completion response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                debug!("Failed to parse chat completion response: {}", e);
                AnalyzerError::Json(e)
            })?;

        if let Some(usage) = completion.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            code: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text)
            .ok()?
            .error?;
        error.message.or(error.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> OpenAiConfig {
        OpenAiConfig {
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_key_rejected() {
        let err = VisionClient::new(&config_with_key(None)).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingApiKey));
    }

    #[test]
    fn test_blank_key_rejected() {
        let err = VisionClient::new(&config_with_key(Some("   "))).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingApiKey));
    }

    #[test]
    fn test_client_settings() {
        let config = OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            api_base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        let client = VisionClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/v1");
        assert_eq!(client.chat_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "o4-mini");
        assert_eq!(client.max_completion_tokens(), 500);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client = VisionClient::new(&config_with_key(Some("sk-supersecretvalue"))).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("supersecretvalue"));
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"message":"Invalid image data","type":"invalid_request_error","code":null}}"#;
        assert_eq!(
            VisionClient::extract_error_message(body).as_deref(),
            Some("Invalid image data")
        );
        assert_eq!(VisionClient::extract_error_message("upstream timeout"), None);
    }
}

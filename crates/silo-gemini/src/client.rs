//! Gemini HTTP client.

use crate::error::{GeminiError, GeminiResult};
use crate::types::*;
use reqwest::Client;
use silo_config::EmbeddingConfig;
use std::time::Duration;
use tracing::debug;

/// Client for the Gemini embedding API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    host: String,
    model: String,
    task_type: String,
    title: Option<String>,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration and an API key.
    pub fn from_config(config: &EmbeddingConfig, api_key: impl Into<String>) -> GeminiResult<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GeminiError::Http)?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            task_type: config.task_type.clone(),
            title: config.title.clone(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Generate an embedding for one text fragment.
    pub async fn embed(&self, text: &str) -> GeminiResult<Vec<f32>> {
        let url = format!("{}/v1beta/models/{}:embedContent", self.host, self.model);
        debug!(
            "Requesting embedding from model {} for text length {}",
            self.model,
            text.len()
        );

        let mut request = EmbedContentRequest::new(format!("models/{}", self.model), text)
            .with_task_type(&self.task_type);
        if let Some(title) = &self.title {
            request = request.with_title(title);
        }

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GeminiError::Unreachable {
                        host: self.host.clone(),
                    }
                } else if e.is_timeout() {
                    GeminiError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    GeminiError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body,
            };

            if status.as_u16() == 429 {
                return Err(GeminiError::QuotaExceeded { message });
            }

            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let embed_response: EmbedContentResponse = response.json().await?;
        if embed_response.embedding.values.is_empty() {
            return Err(GeminiError::EmptyEmbedding);
        }

        debug!(
            "Received embedding with {} dimensions",
            embed_response.embedding.values.len()
        );

        Ok(embed_response.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = EmbeddingConfig::default();
        let client = GeminiClient::from_config(&config, "test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_host_trailing_slash_normalized() {
        let config = EmbeddingConfig {
            host: "https://generativelanguage.googleapis.com/".to_string(),
            ..EmbeddingConfig::default()
        };
        let client = GeminiClient::from_config(&config, "test-key").unwrap();
        assert_eq!(client.host, "https://generativelanguage.googleapis.com");
    }
}

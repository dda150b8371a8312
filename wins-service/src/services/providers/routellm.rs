//! RouteLLM provider implementation.
//!
//! RouteLLM exposes an OpenAI-compatible `/chat/completions` endpoint
//! authenticated with a bearer key.

use super::{ChatCompletion, ChatProvider, ChatRequest, ProviderError};
use crate::config::RouteLlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

const PROVIDER_NAME: &str = "RouteLLM";

/// RouteLLM chat-completion client.
///
/// No request timeout is set: a call waits until RouteLLM answers or the
/// connection fails.
pub struct RouteLlmProvider {
    api_key: Secret<String>,
    endpoint: String,
    client: Client,
}

impl RouteLlmProvider {
    pub fn new(config: &RouteLlmConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "RouteLLM API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("wins-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for RouteLlmProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ProviderError> {
        tracing::debug!(
            model = %request.model,
            temperature = request.temperature,
            json_output = request.response_format.is_some(),
            prompt_len = request.prompt_len(),
            "Sending request to RouteLLM"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "RouteLLM returned an error status");

            return Err(ProviderError::Upstream {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(ChatCompletion::from_json(body))
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

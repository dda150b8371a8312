//! Chat-completion provider abstraction.
//!
//! Handlers talk to a [`ChatProvider`]; production wires in RouteLLM,
//! tests wire in the recording mock.

pub mod mock;
pub mod routellm;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use thiserror::Error;

/// Sampling temperature when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Non-success status; `body` is the raw response text.
    #[error("{provider} error {status}: {body}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::NetworkError(_) => "network",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Hint asking the model for a particular reply encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// Outbound body: `{ model, messages, temperature, response_format? }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            response_format: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn prompt_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}

/// Parsed upstream reply. Only the fields the service reads are typed.
///
/// Decoding never fails on shape: a `choices` or `usage` entry that does not
/// match is read as absent, so any JSON body yields a completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, deserialize_with = "lenient_choices")]
    pub choices: Vec<Choice>,
    #[serde(
        default,
        deserialize_with = "lenient_usage",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}

fn lenient_choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(choices)
}

fn lenient_usage<'de, D>(deserializer: D) -> Result<Option<Usage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

impl ChatCompletion {
    /// Content of the first choice, if the model returned any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }

    /// Read a reply body of any shape; a non-object yields no choices.
    pub fn from_json(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    /// Convenience constructor for a single-choice reply.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }
}

/// One outbound chat completion per call; implementations never retry.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ProviderError>;

    /// Provider name for logs and metrics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_to_plain_text_at_default_temperature() {
        let request = ChatRequest::new("gpt-4.1-mini", vec![ChatMessage::user("hi")]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4.1-mini",
                "messages": [{ "role": "user", "content": "hi" }],
                "temperature": 0.4,
            })
        );
    }

    #[test]
    fn json_hint_serializes_as_json_object() {
        let request = ChatRequest::new("m", vec![ChatMessage::system("s")])
            .with_temperature(0.3)
            .with_response_format(ResponseFormat::JsonObject);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["response_format"], json!({ "type": "json_object" }));
        assert_eq!(body["temperature"], json!(0.3));
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[test]
    fn first_content_reads_first_choice() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } },
            ],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 },
        }))
        .unwrap();

        assert_eq!(completion.first_content(), Some("first"));
        assert_eq!(completion.usage.unwrap().prompt_tokens, Some(12));
    }

    #[test]
    fn first_content_tolerates_missing_pieces() {
        let empty: ChatCompletion = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_content(), None);

        let null_content: ChatCompletion =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": null } }] }))
                .unwrap();
        assert_eq!(null_content.first_content(), None);
    }

    #[test]
    fn null_or_odd_shaped_fields_do_not_fail_decoding() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "hi" } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": null },
        }))
        .unwrap();
        assert_eq!(completion.first_content(), Some("hi"));
        assert_eq!(
            completion.usage,
            Some(Usage {
                prompt_tokens: Some(5),
                completion_tokens: None,
            })
        );

        let null_choices: ChatCompletion =
            serde_json::from_value(json!({ "choices": null, "usage": "n/a" })).unwrap();
        assert!(null_choices.choices.is_empty());
        assert!(null_choices.usage.is_none());

        let null_choice: ChatCompletion =
            serde_json::from_value(json!({ "choices": [null, { "message": { "content": "x" } }] }))
                .unwrap();
        assert_eq!(null_choice.first_content(), None);

        assert_eq!(ChatCompletion::from_json(json!("ok")), ChatCompletion::default());
    }

    #[test]
    fn upstream_error_message_carries_status_and_body() {
        let err = ProviderError::Upstream {
            provider: "RouteLLM",
            status: 401,
            body: "invalid api key".into(),
        };

        assert_eq!(err.to_string(), "RouteLLM error 401: invalid api key");
        assert_eq!(err.kind(), "upstream");
    }
}

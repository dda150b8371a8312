//! Mock provider for testing.

use super::{ChatCompletion, ChatProvider, ChatRequest, ProviderError};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

enum MockReply {
    Completion(ChatCompletion),
    Failure { status: u16, body: String },
}

/// Replies with a fixed completion and records every request it receives.
pub struct MockChatProvider {
    reply: MockReply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatProvider {
    /// Reply whose first choice carries `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::with_completion(ChatCompletion::from_content(content))
    }

    /// Reply with no choices at all.
    pub fn without_content() -> Self {
        Self::with_completion(ChatCompletion::default())
    }

    pub fn with_completion(completion: ChatCompletion) -> Self {
        Self {
            reply: MockReply::Completion(completion),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call as if upstream answered with `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Failure {
                status,
                body: body.into(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match &self.reply {
            MockReply::Completion(completion) => Ok(completion.clone()),
            MockReply::Failure { status, body } => Err(ProviderError::Upstream {
                provider: "RouteLLM",
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

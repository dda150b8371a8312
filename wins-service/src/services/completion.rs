use super::metrics;
use super::providers::{ChatCompletion, ChatProvider, ChatRequest, ProviderError};
use std::time::Instant;

/// Run one chat completion, recording latency, outcome and token usage.
pub async fn request_completion(
    provider: &dyn ChatProvider,
    endpoint: &'static str,
    request: &ChatRequest,
) -> Result<ChatCompletion, ProviderError> {
    let started = Instant::now();
    let result = provider.complete(request).await;
    let elapsed = started.elapsed();

    match &result {
        Ok(completion) => {
            metrics::record_upstream_request(
                provider.name(),
                endpoint,
                "success",
                elapsed.as_secs_f64(),
            );
            if let Some(usage) = &completion.usage {
                metrics::record_tokens(
                    &request.model,
                    usage.prompt_tokens.unwrap_or_default(),
                    usage.completion_tokens.unwrap_or_default(),
                );
            }
            tracing::info!(
                provider = provider.name(),
                endpoint,
                model = %request.model,
                latency_ms = elapsed.as_millis() as u64,
                has_content = completion.first_content().is_some(),
                "Chat completion finished"
            );
        }
        Err(e) => {
            metrics::record_upstream_request(
                provider.name(),
                endpoint,
                "error",
                elapsed.as_secs_f64(),
            );
            metrics::record_upstream_error(provider.name(), e.kind());
            tracing::error!(
                provider = provider.name(),
                endpoint,
                model = %request.model,
                latency_ms = elapsed.as_millis() as u64,
                error = %e,
                "Chat completion failed"
            );
        }
    }

    result
}

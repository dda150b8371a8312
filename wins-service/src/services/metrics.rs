//! Prometheus metrics for wins-service.
//!
//! Covers the outbound chat-completion calls: volume, latency, failures and
//! token usage.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

static METRICS: OnceLock<Metrics> = OnceLock::new();

struct Metrics {
    registry: Registry,
    upstream_requests_total: IntCounterVec,
    upstream_latency_seconds: HistogramVec,
    upstream_errors_total: IntCounterVec,
    upstream_tokens_total: IntCounterVec,
}

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let upstream_requests_total = IntCounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total chat-completion requests by endpoint and outcome",
            ),
            &["provider", "endpoint", "outcome"],
        )?;

        let upstream_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_latency_seconds",
                "Chat-completion API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "endpoint"],
        )?;

        let upstream_errors_total = IntCounterVec::new(
            Opts::new("upstream_errors_total", "Total chat-completion failures"),
            &["provider", "error_type"],
        )?;

        let upstream_tokens_total = IntCounterVec::new(
            Opts::new("upstream_tokens_total", "Total tokens reported by the provider"),
            &["model", "type"], // type: input, output
        )?;

        registry.register(Box::new(upstream_requests_total.clone()))?;
        registry.register(Box::new(upstream_latency_seconds.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;
        registry.register(Box::new(upstream_tokens_total.clone()))?;

        Ok(Self {
            registry,
            upstream_requests_total,
            upstream_latency_seconds,
            upstream_errors_total,
            upstream_tokens_total,
        })
    }
}

/// Register all metrics. Later calls are no-ops.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    // A concurrent initializer may win the race; its set is equally complete.
    let _ = METRICS.set(Metrics::new()?);
    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

/// Record one finished chat-completion call.
pub fn record_upstream_request(provider: &str, endpoint: &str, outcome: &str, duration_secs: f64) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .upstream_requests_total
            .with_label_values(&[provider, endpoint, outcome])
            .inc();
        metrics
            .upstream_latency_seconds
            .with_label_values(&[provider, endpoint])
            .observe(duration_secs);
    }
}

pub fn record_upstream_error(provider: &str, error_type: &str) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .upstream_errors_total
            .with_label_values(&[provider, error_type])
            .inc();
    }
}

pub fn record_tokens(model: &str, input_tokens: u64, output_tokens: u64) {
    if let Some(metrics) = METRICS.get() {
        let tokens = &metrics.upstream_tokens_total;
        tokens.with_label_values(&[model, "input"]).inc_by(input_tokens);
        tokens.with_label_values(&[model, "output"]).inc_by(output_tokens);
    }
}

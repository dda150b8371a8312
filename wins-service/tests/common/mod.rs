#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use tower::util::ServiceExt;
use wins_service::config::{RouteLlmConfig, WinsConfig, DEFAULT_MODEL};
use wins_service::services::providers::mock::MockChatProvider;
use wins_service::{build_router, AppState};

pub const TEST_API_KEY: &str = "test-routellm-key";

pub fn test_config(base_url: &str) -> WinsConfig {
    WinsConfig {
        common: Config { port: 0 },
        routellm: RouteLlmConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: base_url.to_string(),
            model: DEFAULT_MODEL.to_string(),
        },
        otlp_endpoint: None,
    }
}

pub fn router_with(provider: Arc<MockChatProvider>) -> Router {
    build_router(AppState {
        config: test_config("http://routellm.invalid/v1"),
        provider,
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not JSON")
    }
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

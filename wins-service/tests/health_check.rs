mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{router_with, send};
use std::sync::Arc;
use wins_service::services::metrics::init_metrics;
use wins_service::services::providers::mock::MockChatProvider;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = router_with(Arc::new(MockChatProvider::with_content("{}")));

    let response = send(
        app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "wins-service");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = router_with(Arc::new(MockChatProvider::with_content("{}")));

    let response = tower::util::ServiceExt::oneshot(
        app,
        Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = router_with(Arc::new(MockChatProvider::with_content("{}")));

    let response = tower::util::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("OPTIONS")
            .uri("/api/analyze")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn metrics_endpoint_reports_upstream_calls() {
    init_metrics().unwrap();
    let provider = Arc::new(MockChatProvider::with_content("{}"));
    let app = router_with(provider);

    common::post_json(app.clone(), "/api/analyze", serde_json::json!({})).await;
    let response = send(
        app,
        Request::builder().uri("/metrics").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("text/plain"));
    assert!(response.body.contains("upstream_requests_total"));
}

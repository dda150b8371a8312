//! Application startup and lifecycle management.

use crate::config::WinsConfig;
use crate::handlers;
use crate::services::metrics;
use crate::services::providers::routellm::RouteLlmProvider;
use crate::services::providers::ChatProvider;
use axum::{
    extract::DefaultBodyLimit,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: WinsConfig,
    pub provider: Arc<dyn ChatProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/api/analyze", post(handlers::analyze_checkin))
        .route("/api/draft", post(handlers::draft_celebration))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against RouteLLM.
    pub async fn build(config: WinsConfig) -> Result<Self, AppError> {
        let provider = RouteLlmProvider::new(&config.routellm).map_err(|e| {
            tracing::error!("Failed to initialize RouteLLM provider: {}", e);
            AppError::ConfigError(e.into())
        })?;

        tracing::info!(
            model = %config.routellm.model,
            endpoint = %provider.endpoint(),
            "Initialized RouteLLM provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application with an explicit provider (port 0 = random port).
    pub async fn build_with_provider(
        config: WinsConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, AppError> {
        metrics::init_metrics().map_err(|e| AppError::InternalError(e.into()))?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState { config, provider });

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Backend running on http://localhost:{}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

use service_core::observability::init_tracing;
use wins_service::config::WinsConfig;
use wins_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first: without a credential the process must not start.
    let config = WinsConfig::load().map_err(|e| {
        eprintln!(
            "Failed to load configuration: {}. Set ROUTELLM_API_KEY in .env or your shell.",
            e
        );
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("wins-service", "info", config.otlp_endpoint.as_deref());

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}

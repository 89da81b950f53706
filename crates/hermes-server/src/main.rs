use tracing_subscriber::EnvFilter;

use hermes_mcp::ToolRegistry;
use hermes_server::app_state::AppState;
use hermes_server::config::ServerConfig;
use hermes_weather::{weather_tools, NwsClient};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let nws = NwsClient::new(&config.nws_api_url, &config.nws_user_agent);
    let registry = ToolRegistry::new(config.descriptor(), weather_tools(&nws));
    tracing::info!("Registered {} tools", registry.len());

    let state = AppState::new(registry, config.call_timeout);
    let app = hermes_server::router::create_router(state);

    let addr = config.addr();
    tracing::info!("Hermes server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

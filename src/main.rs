#![recursion_limit = "256"]

mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::HostConfig::from_env()?;
    tracing::info!(api_origin = %config.api_origin, "backend origin configured");

    let app = routes::app(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!(port = config.port, "portal listening");
    axum::serve(listener, app).await?;
    Ok(())
}

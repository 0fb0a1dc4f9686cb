//! zonescan Web - HTTP API for partition table analysis
//!
//! Clients upload the first bytes of a disk image and receive the JSON
//! analysis view.

mod app;
mod config;

use anyhow::{Context, Result};
use config::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let app = app::router(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        max_concurrent = config.max_concurrent,
        "zonescan web server listening on {}",
        config.bind_addr
    );
    println!("zonescan web server");
    println!("   Listening on http://{}", config.bind_addr);
    println!();
    println!("   Endpoints:");
    println!("   - GET  /health");
    println!("   - POST /api/analyze?filename=<label>   (body: raw image bytes)");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

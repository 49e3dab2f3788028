mod config;
mod errors;
mod routes;
mod service;
mod upstream;

use anyhow::Context;
use tracing::info;

use crate::config::RelayConfig;
use crate::service::relay_service::RelayService;
use crate::upstream::Upstream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=debug,chat_core=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = RelayConfig::from_env()?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let upstream = Upstream::from_config(&config).context("Failed to build backend HTTP client")?;
    info!("Relaying chat turns to {}", upstream.describe());
    let relay_service = RelayService::new(upstream);

    // ── Router ────────────────────────────────────────────────────────────────
    let app = routes::router(relay_service);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}

//! Allocation API HTTP server binary.
//!
//! Binds `0.0.0.0` and `[::]` on one port, logs the URLs other machines can
//! use, then serves until Ctrl-C.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 5207)
//! - `APP_ENVIRONMENT` — `Development` also serves the OpenAPI document and Swagger UI (default: Production)
//! - `OVERLAY_DOMAIN_SUFFIX` / `OVERLAY_TAILNET` — overlay-network name discovery
//! - `RUST_LOG` — Tracing filter (default: "info,allocation_api=debug,tower_http=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! APP_ENVIRONMENT=Development PORT=8080 cargo run --bin server
//! ```

use allocation_api::{app_router, network, AppState, ServerConfig};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,allocation_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    let listeners = network::bind_dual_stack(config.port)
        .with_context(|| format!("failed to bind port {}", config.port))?;

    let urls: Vec<String> = listeners
        .iter()
        .filter_map(|listener| listener.local_addr().ok())
        .map(|addr| format!("http://{}", addr))
        .collect();
    tracing::info!(
        version = allocation_api::VERSION,
        environment = %config.environment,
        "allocation API listening on {}",
        urls.join(", ")
    );
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /api/allocation — endpoint description");
    tracing::info!("  POST /api/allocation — submit jobs, vehicles and depots");
    tracing::info!("  GET  /name           — connectivity check");

    network::log_access_urls(&config).await;

    let app = app_router(AppState::new(config));
    network::serve(listeners, app)
        .await
        .context("server failed")?;

    Ok(())
}

//! Router assembly for the allocation API.
//!
//! # Routes
//!
//! - `GET  /api/allocation` — Returns `{"message", "endpoint", "method", "timestamp"}`
//! - `POST /api/allocation` — Accepts `AllocationRequest`, returns `AllocationResponse`
//! - `GET  /name`           — Returns a fixed connectivity string
//! - `POST /name`           — Accepts `NameRequest`
//! - `GET  /swagger/v1/swagger.json` — OpenAPI document, development only
//! - `GET  /swagger/`       — Swagger UI, development only
//!
//! Every route is wrapped in a permissive CORS layer and a request trace span.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::allocation::{self, ALLOCATION_PATH};
use super::name::{self, NAME_PATH};
use super::openapi::{self, OPENAPI_PATH, SWAGGER_UI_PATH};
use crate::config::ServerConfig;

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration fixed at startup.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            ALLOCATION_PATH,
            get(allocation::info_handler).post(allocation::allocate_handler),
        )
        .route(NAME_PATH, get(name::status_handler).post(name::ask_handler));

    if state.config.environment.is_development() {
        tracing::debug!(
            "serving OpenAPI document at {} and Swagger UI at {}/",
            OPENAPI_PATH,
            SWAGGER_UI_PATH
        );
        router = router.merge(openapi::swagger_ui());
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

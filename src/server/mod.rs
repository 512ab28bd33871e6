//! HTTP surface of the allocation API.
//!
//! # Endpoints
//!
//! - `GET  /api/allocation` — Describe the allocation endpoint
//! - `POST /api/allocation` — Echo jobs, vehicles and depots with counts
//! - `GET  /name`           — Connectivity check
//! - `POST /name`           — Answer the one question it knows
//! - `GET  /swagger/v1/swagger.json` — OpenAPI document (development only)

pub mod allocation;
pub mod error;
pub mod extract;
pub mod name;
pub mod openapi;
pub mod routes;

pub use error::ApiError;
pub use routes::{app_router, AppState};

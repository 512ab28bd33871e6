//! # Allocation API
//!
//! HTTP API skeleton for assigning jobs to vehicles and depots. No
//! allocation is computed yet: `POST /api/allocation` validates that a body
//! was sent and echoes the submitted jobs, vehicles and depots with their
//! counts. A second controller at `/name` serves as a connectivity check.
//!
//! The service binds on every IPv4 and IPv6 interface, allows cross-origin
//! requests from anywhere and, at startup, logs the URLs under which other
//! machines (typically on an overlay network) can reach it.

pub mod config;
pub mod models;
pub mod network;
pub mod server;

pub use config::{ConfigError, Environment, ServerConfig};
pub use models::{
    AllocationInfo, AllocationRequest, AllocationResponse, Depot, Job, NameRequest, Vehicle,
};
pub use server::{app_router, ApiError, AppState};

/// Crate version reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

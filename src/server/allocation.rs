//! `/api/allocation` handlers.
//!
//! No allocation is computed: the POST handler checks that a body was sent
//! and echoes it back with per-sequence counts.

use axum::Json;

use crate::models::{AllocationInfo, AllocationRequest, AllocationResponse};

use super::error::ApiError;
use super::extract::OptionalJson;

pub const ALLOCATION_PATH: &str = "/api/allocation";
pub const NULL_BODY: &str = "Request body cannot be null";

/// GET /api/allocation — describe the endpoint.
#[utoipa::path(
    get,
    path = "/api/allocation",
    tag = "allocation",
    responses((status = 200, description = "Endpoint description", body = AllocationInfo))
)]
pub async fn info_handler() -> Json<AllocationInfo> {
    Json(AllocationInfo::now(ALLOCATION_PATH))
}

/// POST /api/allocation — echo the submitted jobs, vehicles and depots.
#[utoipa::path(
    post,
    path = "/api/allocation",
    tag = "allocation",
    request_body = AllocationRequest,
    responses(
        (status = 200, description = "Echo of the request with counts", body = AllocationResponse),
        (status = 400, description = "Request body was null or empty", body = String)
    )
)]
pub async fn allocate_handler(
    OptionalJson(request): OptionalJson<AllocationRequest>,
) -> Result<Json<AllocationResponse>, ApiError> {
    let request = request.ok_or(ApiError::BadRequest(NULL_BODY))?;

    tracing::debug!(
        jobs = request.jobs.len(),
        vehicles = request.vehicles.len(),
        depots = request.depots.len(),
        "allocation request received"
    );

    Ok(Json(AllocationResponse::from(request)))
}

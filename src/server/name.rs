//! `/name` handlers: a connectivity check and a single fixed question.

use super::error::ApiError;
use super::extract::OptionalJson;
use crate::models::NameRequest;

pub const NAME_PATH: &str = "/name";

pub const CONNECTED: &str = "API is working! Connected successfully.";
pub const QUESTION: &str = "What is my name";
pub const ANSWER: &str = "I am SMK!";
pub const WRONG_QUESTION: &str = "Hahaha!!!";

/// GET /name
#[utoipa::path(
    get,
    path = "/name",
    tag = "name",
    responses((status = 200, description = "Connectivity confirmation", body = String))
)]
pub async fn status_handler() -> &'static str {
    CONNECTED
}

/// POST /name — answers only the exact, case-sensitive [`QUESTION`].
#[utoipa::path(
    post,
    path = "/name",
    tag = "name",
    request_body = NameRequest,
    responses(
        (status = 200, description = "The question was recognised", body = String),
        (status = 400, description = "Any other input", body = String)
    )
)]
pub async fn ask_handler(
    OptionalJson(request): OptionalJson<NameRequest>,
) -> Result<&'static str, ApiError> {
    match request.and_then(|r| r.input).as_deref() {
        Some(QUESTION) => Ok(ANSWER),
        _ => Err(ApiError::BadRequest(WRONG_QUESTION)),
    }
}

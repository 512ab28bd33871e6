//! OpenAPI document and Swagger UI for the API, served only in development.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{allocation, name};
use crate::models::{
    AllocationInfo, AllocationRequest, AllocationResponse, Depot, Job, NameRequest, Vehicle,
};

pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    paths(
        allocation::info_handler,
        allocation::allocate_handler,
        name::status_handler,
        name::ask_handler,
    ),
    components(schemas(
        Job,
        Vehicle,
        Depot,
        AllocationRequest,
        AllocationResponse,
        AllocationInfo,
        NameRequest,
    )),
    tags(
        (name = "allocation", description = "Job, vehicle and depot submission"),
        (name = "name", description = "Connectivity check"),
    )
)]
pub struct ApiDoc;

/// Swagger UI under `/swagger/`, backed by the document at [`OPENAPI_PATH`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}

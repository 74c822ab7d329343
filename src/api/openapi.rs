use crate::api::handlers::{health, swift_codes};
use crate::swift::models::{
    CreateSwiftCodeRequest, MessageResponse, SwiftCodeBranch, SwiftCodeResponse, SwiftCodeSummary,
    SwiftCodesByCountryResponse,
};
use axum::response::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "swift-codes",
        description = "REST API for bank SWIFT-code records"
    ),
    paths(
        health::health,
        swift_codes::get_swift_code,
        swift_codes::get_swift_codes_by_country,
        swift_codes::create_swift_code,
        swift_codes::delete_swift_code,
    ),
    components(schemas(
        CreateSwiftCodeRequest,
        SwiftCodeResponse,
        SwiftCodeBranch,
        SwiftCodesByCountryResponse,
        SwiftCodeSummary,
        MessageResponse,
    )),
    tags(
        (name = "swift-codes", description = "SWIFT-code directory"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// axum handler serving the generated document
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

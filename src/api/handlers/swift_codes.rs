//! SWIFT-code CRUD handlers.
//!
//! Handlers parse path and body into typed service calls and are the only
//! layer that converts outcomes into wire-visible status codes. Error bodies
//! carry a human-readable `message` and never leak internal error structure.

use crate::swift::models::{
    CreateSwiftCodeRequest, MessageResponse, SwiftCodeResponse, SwiftCodesByCountryResponse,
};
use crate::swift::service::{ServiceError, SwiftService};
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::error;

fn message(status: StatusCode, text: &str) -> axum::response::Response {
    (
        status,
        Json(MessageResponse {
            message: text.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::InvalidFormat | Self::MissingField(_) | Self::InconsistentFlag => {
                message(StatusCode::BAD_REQUEST, &self.to_string())
            }
            Self::Duplicate => message(StatusCode::CONFLICT, &self.to_string()),
            Self::NotFound => message(StatusCode::NOT_FOUND, &self.to_string()),
            Self::Storage(err) => {
                error!("Storage error: {err}");
                message(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/swift-codes/{code}",
    params(("code" = String, Path, description = "SWIFT code, 8 or 11 characters")),
    responses(
        (status = 200, description = "SWIFT code details, with branches when the code is a headquarters", body = SwiftCodeResponse),
        (status = 404, description = "SWIFT code not found", body = MessageResponse),
    ),
    tag = "swift-codes"
)]
/// Handles GET /swift-codes/{code}
pub async fn get_swift_code(
    Path(code): Path<String>,
    Extension(service): Extension<SwiftService>,
) -> impl IntoResponse {
    match service.get_details(&code).await {
        Ok(Some(details)) => (StatusCode::OK, Json(details)).into_response(),
        Ok(None) => message(StatusCode::NOT_FOUND, "SWIFT code not found"),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/swift-codes/country/{iso2}",
    params(("iso2" = String, Path, description = "2-letter country code, as stored (upper case)")),
    responses(
        (status = 200, description = "SWIFT codes for the country", body = SwiftCodesByCountryResponse),
        (status = 404, description = "No SWIFT codes for the country", body = MessageResponse),
    ),
    tag = "swift-codes"
)]
/// Handles GET /swift-codes/country/{iso2}
pub async fn get_swift_codes_by_country(
    Path(iso2): Path<String>,
    Extension(service): Extension<SwiftService>,
) -> impl IntoResponse {
    match service.get_by_country(&iso2).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => message(StatusCode::NOT_FOUND, "no SWIFT codes found for country"),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/swift-codes",
    request_body = CreateSwiftCodeRequest,
    responses(
        (status = 201, description = "SWIFT code created", body = MessageResponse),
        (status = 400, description = "Malformed body or invalid input", body = MessageResponse),
        (status = 409, description = "SWIFT code already exists", body = MessageResponse),
    ),
    tag = "swift-codes"
)]
/// Handles POST /swift-codes
pub async fn create_swift_code(
    Extension(service): Extension<SwiftService>,
    payload: Result<Json<CreateSwiftCodeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = payload else {
        return message(StatusCode::BAD_REQUEST, "invalid request data");
    };

    match service.create(request).await {
        Ok(()) => message(StatusCode::CREATED, "SWIFT code created successfully"),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/swift-codes/{code}",
    params(("code" = String, Path, description = "SWIFT code, 8 or 11 characters")),
    responses(
        (status = 200, description = "SWIFT code deleted", body = MessageResponse),
        (status = 400, description = "Invalid SWIFT code", body = MessageResponse),
        (status = 404, description = "SWIFT code not found", body = MessageResponse),
    ),
    tag = "swift-codes"
)]
/// Handles DELETE /swift-codes/{code}
pub async fn delete_swift_code(
    Path(code): Path<String>,
    Extension(service): Extension<SwiftService>,
) -> impl IntoResponse {
    match service.delete(&code).await {
        Ok(()) => message(StatusCode::OK, "SWIFT code deleted successfully"),
        Err(err) => err.into_response(),
    }
}

//! HTTP mapping of domain errors and request rejections.
//!
//! Every failure leaves the API as `{"error": "<message>"}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

pub const INTERNAL_ERROR: &str = "Erro interno do servidor";
pub const INVALID_REQUEST: &str = "Requisição inválida";
pub const UNKNOWN_ENDPOINT: &str = "Endpoint não encontrado";
pub const METHOD_NOT_ALLOWED: &str = "Método não permitido";

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Json(JsonRejection),
    Path(PathRejection),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Json(e)
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::Path(e)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Domain(DomainError::NotFound(_)) => (StatusCode::NOT_FOUND, self.message()),
            ApiError::Domain(DomainError::Validation(_) | DomainError::Storage(_)) => {
                (StatusCode::BAD_REQUEST, self.message())
            }
            ApiError::Domain(DomainError::Internal(detail)) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            ApiError::Json(rejection) => {
                tracing::debug!("Rejected JSON body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, self.message())
            }
            ApiError::Path(rejection) => {
                tracing::debug!("Rejected path parameter: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, self.message())
            }
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(e) => e.to_string(),
            // Type mismatches name the offending field; syntax errors do not
            ApiError::Json(JsonRejection::JsonDataError(e)) => e.body_text(),
            ApiError::Json(_) | ApiError::Path(_) => INVALID_REQUEST.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// JSON body extractor whose rejections use the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path extractor whose rejections use the API error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// Fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": UNKNOWN_ENDPOINT })),
    )
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": METHOD_NOT_ALLOWED })),
    )
}

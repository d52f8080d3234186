use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stockline_catalog::CatalogError;
use stockline_core::BusinessError;

pub const INTERNAL_ERROR_CODE: &str = "E500-001";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Everything a handler can fail with.
///
/// Business errors are projected with their own code and status; anything
/// else collapses to `E500-001` and the cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Business(#[from] BusinessError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_format(field: impl Into<String>) -> Self {
        ApiError::Business(BusinessError::invalid_format(field))
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Business(e) => ApiError::Business(e),
            CatalogError::Repository(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_format(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Business(err) => {
                tracing::warn!(code = err.code(), "{err}");
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                json_error(status, err.code(), err.to_string())
            }
            ApiError::Internal(cause) => {
                tracing::error!(code = INTERNAL_ERROR_CODE, %cause, "request failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_CODE,
                    INTERNAL_ERROR_MESSAGE,
                )
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "code": code,
            "status": status.as_u16(),
            "message": message.into(),
        })),
    )
        .into_response()
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use frag_core::FragmentError;
use tracing::warn;

use crate::response::error_body;

/// HTTP-facing error: a status code plus the message the envelope carries.
///
/// Core errors convert via `From`, so handlers can use `?` on any
/// `FragmentResult` and get the documented status mapping: validation → 400,
/// unsupported type → 415, not found → 404, persistence/conversion → 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<FragmentError> for ApiError {
    fn from(err: FragmentError) -> Self {
        let status = match &err {
            FragmentError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            FragmentError::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FragmentError::NotFound { .. } => StatusCode::NOT_FOUND,
            FragmentError::UnknownType { .. }
            | FragmentError::Persistence { .. }
            | FragmentError::Conversion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %err, "request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(error_body(self.status.as_u16(), &self.message)),
        )
            .into_response()
    }
}

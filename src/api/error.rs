//! HTTP error mapping for the backend error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::drive::DriveError;

/// Error response body: human-readable message plus machine-readable kind.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// Wrapper that maps [`DriveError`] onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DriveError);

impl From<DriveError> for ApiError {
    fn from(err: DriveError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DriveError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            DriveError::NotFound(_) => StatusCode::NOT_FOUND,
            DriveError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            DriveError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
            // Config errors only exist at startup; a stray one is a bug.
            DriveError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(
            code = self.0.code(),
            status = %status,
            error = %self.0,
            "Request failed"
        );
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}

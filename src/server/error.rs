// src/server/error.rs
// =============================================================================
// Maps request failures to HTTP responses.
//
// Status codes:
// - 400: no path given, or the email holds no reachable JSON
// - 500: the email could not be read or parsed
//
// Error bodies look like {"statusCode": 400, "message": "...", "error": "Bad Request"}
// =============================================================================

use crate::service::ExtractError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError(pub ExtractError);

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ExtractError::MissingPath | ExtractError::NoJsonFound => StatusCode::BAD_REQUEST,
            ExtractError::Fetch(_) | ExtractError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "rejected request");
        }

        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.0.to_string(),
            error: status.canonical_reason().unwrap_or("Error"),
        };
        (status, Json(body)).into_response()
    }
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FedpackError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid tracking number format. Please check your tracking number and try again.")]
    InvalidTrackingNumber,

    #[error(
        "This tracking number does not exist in our system. Please check the number and try again."
    )]
    TrackingNotFound,

    #[error("Package not found")]
    PackageNotFound,

    #[error("A package with tracking number {0} already exists")]
    DuplicateTrackingNumber(String),

    #[error("Username {0} is already taken")]
    DuplicateUsername(String),

    #[error("Unsupported language")]
    UnsupportedLanguage(String),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),
}

impl FedpackError {
    pub fn status(&self) -> StatusCode {
        match self {
            FedpackError::BadRequest(_)
            | FedpackError::InvalidTrackingNumber
            | FedpackError::DuplicateTrackingNumber(_)
            | FedpackError::DuplicateUsername(_)
            | FedpackError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            FedpackError::TrackingNotFound | FedpackError::PackageNotFound => {
                StatusCode::NOT_FOUND
            }
            FedpackError::UrlParse(_)
            | FedpackError::Reqwest(_)
            | FedpackError::Json(_)
            | FedpackError::UpstreamStatus(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Upstream status carried by this error, if it came from a non-2xx reply.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            FedpackError::UpstreamStatus(code) => Some(*code),
            FedpackError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

impl IntoResponse for FedpackError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ApiErrorResponse { error })).into_response()
    }
}

/// Error payload returned by every route: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

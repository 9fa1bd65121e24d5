//! HTTP handlers for the server.

pub mod attendees;
pub mod bridge;
pub mod label;
pub mod label_config;
pub mod preferences;

use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::error::{BridgeError, GafeteError};

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message, safe to show to the operator.
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Body of endpoints that only report completion.
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

pub fn api_error(e: GafeteError) -> (StatusCode, Json<ApiError>) {
    let status = match &e {
        GafeteError::Validation(_) => StatusCode::BAD_REQUEST,
        GafeteError::NotFound(_) => StatusCode::NOT_FOUND,
        GafeteError::AlreadyCheckedIn { .. } => StatusCode::CONFLICT,
        GafeteError::Bridge(BridgeError::Rejected(_)) => StatusCode::BAD_GATEWAY,
        GafeteError::Bridge(_) => StatusCode::SERVICE_UNAVAILABLE,
        GafeteError::PrintFailed { .. } | GafeteError::Transport(_) => StatusCode::BAD_GATEWAY,
        GafeteError::Io(_) | GafeteError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let (error, details) = match &e {
        GafeteError::Validation(message) => (message.clone(), None),
        GafeteError::PrintFailed { ticket_no, .. } => {
            (e.to_string(), Some(format!("ticket #{ticket_no}")))
        }
        _ => (e.to_string(), None),
    };
    if status.is_server_error() {
        tracing::error!(error = %e, "request failed");
    }
    (
        status,
        Json(ApiError { error, details }),
    )
}

pub fn bad_request(message: &str) -> (StatusCode, Json<ApiError>) {
    api_error(GafeteError::Validation(message.to_string()))
}

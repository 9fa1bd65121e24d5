//! Print bridge handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::error::GafeteError;

use super::super::state::AppState;
use super::{ApiError, ApiResult, api_error};

/// GET /api/bridge/cert - Certificate the browser presents to the relay.
pub async fn cert(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let Some(cert) = state.bridge_cert.clone() else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "Bridge certificate is not configured".to_string(),
                details: None,
            }),
        ));
    };
    Ok(([(header::CONTENT_TYPE, "text/plain")], cert))
}

/// GET /api/bridge/printers - Printers reachable through the relay.
pub async fn printers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let printers = state
        .desk
        .submitter()
        .printers()
        .await
        .map_err(|e| api_error(GafeteError::Bridge(e)))?;
    Ok(Json(printers))
}

//! Workstation preference handlers.

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::error::GafeteError;
use crate::store::Preferences;

use super::super::state::AppState;
use super::{ApiResult, api_error, bad_request};

/// GET /api/preferences - Current printer and station.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(state.preferences.read().await.clone())
}

/// PUT /api/preferences - Remember a printer and station.
pub async fn set(
    State(state): State<Arc<AppState>>,
    Json(prefs): Json<Preferences>,
) -> ApiResult<Json<Preferences>> {
    if prefs.station.trim().is_empty() {
        return Err(bad_request("station is required"));
    }

    let local = state.local.clone();
    let to_save = prefs.clone();
    tokio::task::spawn_blocking(move || local.save_preferences(&to_save))
        .await
        .map_err(|e| api_error(GafeteError::Transport(format!("Task error: {e}"))))?
        .map_err(api_error)?;

    *state.preferences.write().await = prefs.clone();
    tracing::info!(printer = %prefs.printer, station = %prefs.station, "preferences saved");
    Ok(Json(prefs))
}

//! Label preview handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::label::LabelFields;

use super::super::state::AppState;
use super::{ApiResult, api_error, bad_request};

/// Request body for a label preview.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub name: String,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub ticket_no: u32,
    /// Render with this configuration instead of the active one.
    pub config_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub html: String,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// POST /api/label/preview - Render a label without printing it.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    if req.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }
    let fields = LabelFields {
        name: req.name,
        company: req.company,
        location: req.location,
        ticket_no: req.ticket_no,
    };
    let label = state
        .desk
        .preview(&fields, req.config_id)
        .await
        .map_err(api_error)?;
    Ok(Json(PreviewResponse {
        html: label.html,
        width_mm: label.width_mm,
        height_mm: label.height_mm,
    }))
}

//! Configuration service API handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::store::{ConfigRequest, StoredConfiguration};

use super::super::state::AppState;
use super::{ApiResult, Success, api_error, bad_request};

#[derive(Debug, Deserialize)]
pub struct ConfigQuery {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub default: bool,
}

/// GET /api/label-config - List, or one by `?id=`, or the default with
/// `?default=true` (`null` when none is set).
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConfigQuery>,
) -> ApiResult<Response> {
    if query.default {
        let default = state.configs.get_default().await.map_err(api_error)?;
        return Ok(Json(default).into_response());
    }
    if let Some(id) = query.id {
        let stored = state.configs.get(id).await.map_err(api_error)?;
        return Ok(Json(stored).into_response());
    }
    let all = state.configs.list().await.map_err(api_error)?;
    Ok(Json(all).into_response())
}

/// POST /api/label-config - Create a configuration.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfigRequest>,
) -> ApiResult<(StatusCode, Json<StoredConfiguration>)> {
    let config = req.into_configuration().map_err(api_error)?;
    let stored = state.configs.create(config).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /api/label-config - Update the configuration named by `id`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfigRequest>,
) -> ApiResult<Json<StoredConfiguration>> {
    let Some(id) = req.id else {
        return Err(bad_request("ID, name and configuration are required"));
    };
    let config = req.into_configuration().map_err(api_error)?;
    let stored = state.configs.update(id, config).await.map_err(api_error)?;
    Ok(Json(stored))
}

/// DELETE /api/label-config?id= - Delete a configuration.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConfigQuery>,
) -> ApiResult<Json<Success>> {
    let Some(id) = query.id else {
        return Err(bad_request("Configuration ID is required"));
    };
    state.configs.delete(id).await.map_err(api_error)?;
    Ok(Success::ok())
}

//! Attendee and check-in API handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::checkin::{Attendee, AttendeePatch, Badge, DeskOutcome, NewAttendee};

use super::super::state::AppState;
use super::{ApiResult, Success, api_error};

/// Maximum attendees returned by one search.
pub const SEARCH_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct BadgeResponse {
    pub attendee: Attendee,
    pub ticket_no: u32,
}

impl From<Badge> for BadgeResponse {
    fn from(badge: Badge) -> Self {
        Self {
            attendee: badge.attendee,
            ticket_no: badge.ticket_no,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub count: usize,
}

/// GET /api/attendees?q= - Search attendees by name.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Attendee>>> {
    let found = state
        .desk
        .directory()
        .search(&query.q, SEARCH_LIMIT)
        .await
        .map_err(api_error)?;
    Ok(Json(found))
}

/// POST /api/attendees - Add one attendee.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewAttendee>,
) -> ApiResult<(StatusCode, Json<Attendee>)> {
    let attendee = state.desk.directory().insert(new).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(attendee)))
}

/// POST /api/attendees/bulk - Insert or refresh attendees by `external_id`.
pub async fn upsert_many(
    State(state): State<Arc<AppState>>,
    Json(rows): Json<Vec<NewAttendee>>,
) -> ApiResult<Json<UpsertResponse>> {
    let count = state
        .desk
        .directory()
        .upsert_many(rows)
        .await
        .map_err(api_error)?;
    Ok(Json(UpsertResponse { count }))
}

/// PATCH /api/attendees/:id - Edit an attendee.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AttendeePatch>,
) -> ApiResult<Json<Attendee>> {
    let attendee = state
        .desk
        .directory()
        .update(id, patch)
        .await
        .map_err(api_error)?;
    Ok(Json(attendee))
}

/// DELETE /api/attendees/:id - Remove an attendee.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Success>> {
    state.desk.directory().delete(id).await.map_err(api_error)?;
    Ok(Success::ok())
}

/// POST /api/attendees/:id/check-in - Check in and print the badge.
///
/// A repeat request while the first is still running answers
/// `202 {"suppressed": true}` without touching the directory.
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let preferences = state.preferences.read().await.clone();
    match state.desk.check_in(id, &preferences).await.map_err(api_error)? {
        DeskOutcome::Printed(badge) => Ok(Json(BadgeResponse::from(badge)).into_response()),
        DeskOutcome::Suppressed => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "suppressed": true })),
        )
            .into_response()),
    }
}

/// POST /api/attendees/:id/reprint - Print the badge again.
pub async fn reprint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BadgeResponse>> {
    let preferences = state.preferences.read().await.clone();
    let badge = state
        .desk
        .reprint(id, &preferences)
        .await
        .map_err(api_error)?;
    Ok(Json(badge.into()))
}

/// POST /api/reset - Clear attendees and restart the ticket sequence.
pub async fn reset(State(state): State<Arc<AppState>>) -> ApiResult<Json<Success>> {
    state.desk.directory().reset().await.map_err(api_error)?;
    Ok(Success::ok())
}

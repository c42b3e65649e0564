use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::reservations::adapters::inbound::http_support::{
    actor_from_headers, error_response,
};
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::time_adjustment::AdjustmentReason;
use crate::modules::reservations::use_cases::record_time_adjustment::command::RecordTimeAdjustment;
use crate::shell::state::AppState;

/// Venue wall-clock timestamps, e.g. `2025-03-01T14:10:00`.
#[derive(Deserialize)]
pub struct RecordTimeAdjustmentBody {
    pub actual_start: NaiveDateTime,
    pub actual_end: NaiveDateTime,
    pub reason: AdjustmentReason,
    #[serde(default)]
    pub reason_detail: Option<String>,
}

pub async fn record(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<RecordTimeAdjustmentBody>, JsonRejection>,
) -> Response {
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = RecordTimeAdjustment {
        adjustment_id: Uuid::now_v7().to_string(),
        reservation_id,
        actual_start: body.actual_start,
        actual_end: body.actual_end,
        reason: body.reason,
        reason_detail: body.reason_detail,
        actor,
        adjusted_at: state.clock.now(),
    };
    match state.adjustment_handler.handle(command).await {
        Ok(adjustment) => (StatusCode::CREATED, Json(adjustment)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    if !actor.is_staff() {
        return error_response(ReservationError::Forbidden(
            "only staff may read time adjustments".into(),
        ));
    }
    match state.adjustment_handler.list(&reservation_id).await {
        Ok(adjustments) => (StatusCode::OK, Json(adjustments)).into_response(),
        Err(e) => error_response(e),
    }
}

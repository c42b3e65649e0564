use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::reservations::adapters::inbound::http_support::error_response;
use crate::modules::reservations::use_cases::find_available_devices::query::AvailabilityQuery;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SlotsParams {
    pub date: String,
}

pub async fn handle(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    state.sweep_if_enabled().await;
    match state.availability.summarize(&query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn slots(
    State(state): State<AppState>,
    Path(device_type_id): Path<String>,
    params: Result<Query<SlotsParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    state.sweep_if_enabled().await;
    match state
        .availability
        .slot_availability(&device_type_id, &params.date)
        .await
    {
        Ok(slots) => (StatusCode::OK, Json(slots)).into_response(),
        Err(e) => error_response(e),
    }
}

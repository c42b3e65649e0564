use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::modules::reservations::adapters::inbound::http_support::{
    actor_from_headers, error_response,
};
use crate::modules::reservations::use_cases::reserve_device::command::ReserveDevices;
use crate::shell::state::AppState;

/// Hours use the display convention. `user_id` defaults to the caller; staff may book for others.
#[derive(Deserialize)]
pub struct ReserveDevicesBody {
    pub user_id: Option<String>,
    #[serde(alias = "deviceTypeId")]
    pub device_type_id: String,
    pub date: String,
    #[serde(alias = "startHour")]
    pub start_hour: u32,
    #[serde(alias = "endHour")]
    pub end_hour: u32,
    #[serde(default, alias = "preferredDeviceId")]
    pub preferred_device_id: Option<String>,
    #[serde(default = "one_unit")]
    pub units: u32,
}

fn one_unit() -> u32 {
    1
}

pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ReserveDevicesBody>, JsonRejection>,
) -> Response {
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ReserveDevices {
        user_id: body.user_id.unwrap_or_else(|| actor.actor_id.clone()),
        device_type_id: body.device_type_id,
        date: body.date,
        start_hour: body.start_hour,
        end_hour: body.end_hour,
        preferred_device_id: body.preferred_device_id,
        units: body.units,
        actor,
        requested_at: state.clock.now(),
    };

    let result = match state.reserve_handler.reserve_devices(command.clone()).await {
        Err(e) if e.is_retryable() => {
            debug!(error = %e, "retrying booking once");
            state.reserve_handler.reserve_devices(command).await
        }
        other => other,
    };

    match result {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => error_response(e),
    }
}

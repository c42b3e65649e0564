use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::reservations::adapters::inbound::http_support::{
    actor_from_headers, error_response,
};
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::transition_reservation::command::TransitionReservation;
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TransitionBody {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, alias = "paymentAmount")]
    pub payment_amount: Option<u32>,
}

/// `auto_start` is driven by the sweeper only and is not routable.
fn routable(action: &str) -> Option<TransitionKind> {
    action
        .parse::<TransitionKind>()
        .ok()
        .filter(|kind| *kind != TransitionKind::AutoStart)
}

pub async fn handle(
    State(state): State<AppState>,
    Path((reservation_id, action)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(kind) = routable(&action) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    let body: TransitionBody = if body.is_empty() {
        TransitionBody::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(b) => b,
            Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
        }
    };

    if kind == TransitionKind::CheckOut {
        state.sweep_if_enabled().await;
    }

    let command = TransitionReservation {
        reservation_id,
        kind,
        actor,
        now: state.clock.now(),
        reason: body.reason,
        payment_amount: body.payment_amount,
    };
    match state.transition_handler.handle(command).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome.reservation)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn audit(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    match state
        .transition_handler
        .audit_trail(&reservation_id, &actor)
        .await
    {
        Ok(trail) => (StatusCode::OK, Json(trail)).into_response(),
        Err(e) => error_response(e),
    }
}

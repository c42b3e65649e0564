use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::modules::reservations::adapters::inbound::http_support::{
    actor_from_headers, error_response,
};
use crate::modules::reservations::application::errors::ReservationError;
use crate::shell::state::AppState;

/// Staff-triggered sweep at the current venue time.
pub async fn handle(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let actor = match actor_from_headers(&headers) {
        Ok(a) => a,
        Err(response) => return response,
    };
    if !actor.is_staff() {
        return error_response(ReservationError::Forbidden(
            "only staff may trigger a sweep".into(),
        ));
    }
    match state.sweeper.run(state.clock.now()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}

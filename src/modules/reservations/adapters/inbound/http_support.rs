// Shared pieces of the HTTP edge: actor extraction and error-to-status mapping.
//
// Authentication happens upstream. The gateway forwards the caller as two headers.

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::actor::{Actor, ActorRole};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `401` without a usable identity. The system role is internal and never accepted here.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, Response> {
    let actor_id = header(headers, ACTOR_ID_HEADER);
    let role = header(headers, ACTOR_ROLE_HEADER).and_then(|r| r.parse::<ActorRole>().ok());
    match (actor_id, role) {
        (Some(_), Some(ActorRole::System)) => Err(StatusCode::FORBIDDEN.into_response()),
        (Some(actor_id), Some(role)) => Ok(Actor {
            actor_id: actor_id.to_string(),
            role,
        }),
        _ => Err(StatusCode::UNAUTHORIZED.into_response()),
    }
}

pub fn status_for(error: &ReservationError) -> StatusCode {
    match error {
        ReservationError::Validation(_)
        | ReservationError::InvalidTransition(_)
        | ReservationError::CapacityExceeded { .. } => StatusCode::BAD_REQUEST,
        ReservationError::NotFound(_) => StatusCode::NOT_FOUND,
        ReservationError::Conflict(_) => StatusCode::CONFLICT,
        ReservationError::Forbidden(_) => StatusCode::FORBIDDEN,
        ReservationError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: ReservationError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        warn!(error = %error, "request failed");
    }
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

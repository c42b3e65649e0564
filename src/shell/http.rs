use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::reservations::use_cases::find_available_devices::inbound::http as availability_http;
use crate::modules::reservations::use_cases::record_time_adjustment::inbound::http as adjustment_http;
use crate::modules::reservations::use_cases::reserve_device::inbound::http as reserve_http;
use crate::modules::reservations::use_cases::sweep_reservations::inbound::http as sweep_http;
use crate::modules::reservations::use_cases::transition_reservation::inbound::http as transition_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/availability", get(availability_http::handle))
        .route(
            "/device-types/{device_type_id}/slots",
            get(availability_http::slots),
        )
        .route("/reservations", post(reserve_http::handle))
        .route(
            "/reservations/{reservation_id}/time-adjustments",
            post(adjustment_http::record).get(adjustment_http::list),
        )
        .route(
            "/reservations/{reservation_id}/audit",
            get(transition_http::audit),
        )
        .route(
            "/reservations/{reservation_id}/{action}",
            post(transition_http::handle),
        )
        .route("/sweeps", post(sweep_http::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use chrono::NaiveDateTime;
use http_body_util::BodyExt;

use crate::modules::reservations::adapters::inbound::http_support::{
    ACTOR_ID_HEADER, ACTOR_ROLE_HEADER,
};
use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shell::config::SchedulingConfig;
use crate::shell::state::AppState;
use crate::tests::fixtures::catalog::seeded_store;
use crate::tests::fixtures::clock::FixedClock;

/// 09:00 on the day of the default reservation, well before its 14:00 start.
pub fn morning() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-03-01T09:00", "%Y-%m-%dT%H:%M").unwrap()
}

pub fn state_with(store: InMemoryReservationStore) -> (AppState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at(morning()));
    let state = AppState::in_memory(
        SchedulingConfig::default(),
        Arc::new(store),
        Arc::new(InMemoryDomainOutbox::new()),
        clock.clone(),
    );
    (state, clock)
}

pub fn test_state() -> (AppState, Arc<FixedClock>) {
    state_with(seeded_store())
}

pub fn offline_state() -> AppState {
    let mut store = seeded_store();
    store.toggle_offline();
    state_with(store).0
}

/// `actor` is `(actor id, role)`. An empty body is sent without a content type.
pub fn json_request(
    method: &str,
    uri: &str,
    actor: Option<(&str, &str)>,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((actor_id, role)) = actor {
        builder = builder
            .header(ACTOR_ID_HEADER, actor_id)
            .header(ACTOR_ROLE_HEADER, role);
    }
    if body.is_empty() {
        return builder.body(Body::empty()).unwrap();
    }
    builder
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// Root event enumeration for the reservation lifecycle.
//
// Events double as the audit trail: every committed change is stored per reservation with
// its stream version, status, timestamp, and actor.
//
// Versioning
// - Prefer additive changes. A breaking change gets a new versioned payload and variant.

pub mod v1 {
    pub mod reservation_requested;
    pub mod reservation_time_adjusted;
    pub mod reservation_transitioned;
}

use chrono::NaiveDateTime;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ReservationEvent {
    ReservationRequestedV1(v1::reservation_requested::ReservationRequestedV1),
    ReservationTransitionedV1(v1::reservation_transitioned::ReservationTransitionedV1),
    ReservationTimeAdjustedV1(v1::reservation_time_adjusted::ReservationTimeAdjustedV1),
}

impl ReservationEvent {
    pub fn reservation_id(&self) -> &str {
        match self {
            ReservationEvent::ReservationRequestedV1(e) => &e.reservation_id,
            ReservationEvent::ReservationTransitionedV1(e) => &e.reservation_id,
            ReservationEvent::ReservationTimeAdjustedV1(e) => &e.adjustment.reservation_id,
        }
    }

    pub fn occurred_at(&self) -> NaiveDateTime {
        match self {
            ReservationEvent::ReservationRequestedV1(e) => e.requested_at,
            ReservationEvent::ReservationTransitionedV1(e) => e.occurred_at,
            ReservationEvent::ReservationTimeAdjustedV1(e) => e.adjustment.adjusted_at,
        }
    }
}

/// One audit trail entry as persisted next to the reservation row.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RecordedEvent {
    pub reservation_id: String,
    pub version: i64,
    pub event: ReservationEvent,
}

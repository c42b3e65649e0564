// Notification hand-offs produced by committed changes.
//
// Intents are delivered through the domain outbox after the store commit. A failed hand-off is
// logged by the caller and never undoes the commit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::reservation::{Reservation, ReservationStatus};
use crate::modules::reservations::core::transitions::TransitionKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub reservation_id: String,
    pub reservation_number: String,
    pub user_id: String,
    pub device_id: Option<String>,
    pub status: ReservationStatus,
    pub occurred_at: NaiveDateTime,
    pub reason: Option<String>,
}

impl NotificationPayload {
    pub fn for_reservation(
        reservation: &Reservation,
        occurred_at: NaiveDateTime,
        reason: Option<String>,
    ) -> Self {
        Self {
            reservation_id: reservation.reservation_id.clone(),
            reservation_number: reservation.reservation_number.clone(),
            user_id: reservation.user_id.clone(),
            device_id: reservation.device_id.clone(),
            status: reservation.status,
            occurred_at,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationIntent {
    NotifyRequested {
        payload: NotificationPayload,
    },
    NotifyTransitioned {
        transition: TransitionKind,
        payload: NotificationPayload,
    },
    NotifyTimeAdjusted {
        payload: NotificationPayload,
    },
}

impl ReservationIntent {
    pub fn topic(&self) -> &'static str {
        match self {
            ReservationIntent::NotifyRequested { .. } => "reservation.requested",
            ReservationIntent::NotifyTransitioned { transition, .. } => transition.topic(),
            ReservationIntent::NotifyTimeAdjusted { .. } => "reservation.time_adjusted",
        }
    }

    pub fn payload(&self) -> &NotificationPayload {
        match self {
            ReservationIntent::NotifyRequested { payload }
            | ReservationIntent::NotifyTransitioned { payload, .. }
            | ReservationIntent::NotifyTimeAdjusted { payload } => payload,
        }
    }

    pub fn payload_mut(&mut self) -> &mut NotificationPayload {
        match self {
            ReservationIntent::NotifyRequested { payload }
            | ReservationIntent::NotifyTransitioned { payload, .. }
            | ReservationIntent::NotifyTimeAdjusted { payload } => payload,
        }
    }
}

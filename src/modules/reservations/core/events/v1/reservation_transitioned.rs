use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::reservation::ReservationStatus;
use crate::modules::reservations::core::transitions::TransitionKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationTransitionedV1 {
    pub reservation_id: String,
    pub transition: TransitionKind,
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    pub occurred_at: NaiveDateTime,
    pub actor: Actor,
    pub reason: Option<String>,
}

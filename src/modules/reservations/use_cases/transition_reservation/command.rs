use chrono::NaiveDateTime;

use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::transitions::TransitionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReservation {
    pub reservation_id: String,
    pub kind: TransitionKind,
    pub actor: Actor,
    /// Venue wall-clock time of the request.
    pub now: NaiveDateTime,
    /// Required for `reject`, optional for `cancel`.
    pub reason: Option<String>,
    /// Recorded on the check-in row.
    pub payment_amount: Option<u32>,
}

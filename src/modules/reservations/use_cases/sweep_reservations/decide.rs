use chrono::NaiveDateTime;

use crate::modules::reservations::core::reservation::{Reservation, ReservationStatus};
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::transition_reservation::decide::TransitionPolicy;

/// The time-triggered transition a reservation is due for at `now`, if any.
///
/// A checked-in reservation past its end is completed directly; relabelling it `in_use`
/// first would only cost an extra pass.
pub fn due_transition(
    reservation: &Reservation,
    now: NaiveDateTime,
    policy: &TransitionPolicy,
) -> Option<TransitionKind> {
    let slot = &reservation.slot;
    match reservation.status {
        ReservationStatus::CheckedIn | ReservationStatus::InUse if now >= slot.ends_at() => {
            Some(TransitionKind::CheckOut)
        }
        ReservationStatus::CheckedIn if now >= slot.starts_at() => Some(TransitionKind::AutoStart),
        ReservationStatus::Approved if now >= policy.no_show_due_at(reservation) => {
            Some(TransitionKind::NoShow)
        }
        _ => None,
    }
}

// Folds lifecycle events into the reservation row.
//
// Responsibilities
// - `None` + requested event creates the reservation.
// - A transition event applies only when the row is still in the event's `from` status.
// - Everything else leaves the state unchanged.

use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::reservation::{PaymentStatus, Reservation};
use crate::modules::reservations::core::transitions::TransitionKind;

pub fn evolve(state: Option<Reservation>, event: ReservationEvent) -> Option<Reservation> {
    match (state, event) {
        (None, ReservationEvent::ReservationRequestedV1(e)) => Some(Reservation {
            reservation_id: e.reservation_id,
            reservation_number: e.reservation_number,
            user_id: e.user_id,
            device_type_id: e.device_type_id,
            device_id: e.device_id,
            slot: e.slot,
            status: e.initial_status,
            payment_status: PaymentStatus::Pending,
            checked_in_at: None,
            actual_start_time: None,
            actual_end_time: None,
            rejection_reason: None,
            cancelled_at: None,
            cancelled_by: None,
            cancellation_reason: None,
            created_at: e.requested_at,
            created_by: e.requested_by.clone(),
            updated_at: e.requested_at,
            updated_by: e.requested_by,
        }),
        (Some(mut reservation), ReservationEvent::ReservationTransitionedV1(e))
            if reservation.status == e.from =>
        {
            match e.transition {
                TransitionKind::Reject => reservation.rejection_reason = e.reason.clone(),
                TransitionKind::Cancel => {
                    reservation.cancelled_at = Some(e.occurred_at);
                    reservation.cancelled_by = Some(e.actor.actor_id.clone());
                    reservation.cancellation_reason = e.reason.clone();
                }
                TransitionKind::CheckIn => {
                    reservation.checked_in_at = Some(e.occurred_at);
                    reservation.actual_start_time = Some(e.occurred_at);
                }
                TransitionKind::CheckOut => {
                    let ended_at = if e.actor.is_system() {
                        e.occurred_at.min(reservation.slot.ends_at())
                    } else {
                        e.occurred_at
                    };
                    reservation.actual_end_time.get_or_insert(ended_at);
                }
                TransitionKind::Approve | TransitionKind::NoShow | TransitionKind::AutoStart => {}
            }
            reservation.status = e.to;
            reservation.updated_at = e.occurred_at;
            reservation.updated_by = e.actor.actor_id;
            Some(reservation)
        }
        (Some(mut reservation), ReservationEvent::ReservationTimeAdjustedV1(e))
            if reservation.reservation_id == e.adjustment.reservation_id =>
        {
            reservation.actual_start_time = Some(e.adjustment.actual_start);
            reservation.actual_end_time = Some(e.adjustment.actual_end);
            reservation.updated_at = e.adjustment.adjusted_at;
            reservation.updated_by = e.adjustment.adjusted_by;
            Some(reservation)
        }
        (state, _) => state,
    }
}

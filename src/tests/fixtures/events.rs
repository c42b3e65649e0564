use chrono::NaiveDateTime;

use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::events::v1::reservation_requested::ReservationRequestedV1;
use crate::modules::reservations::core::events::v1::reservation_transitioned::ReservationTransitionedV1;
use crate::modules::reservations::core::reservation::{Reservation, ReservationStatus};
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::tests::fixtures::reservations::{ReservationBuilder, insert_of};

pub fn requested_event(reservation_id: &str, status: ReservationStatus) -> ReservationRequestedV1 {
    let reservation = ReservationBuilder::new()
        .id(reservation_id)
        .status(status)
        .build();
    match insert_of(&reservation).event {
        ReservationEvent::ReservationRequestedV1(e) => e,
        other => panic!("unexpected seed event {other:?}"),
    }
}

/// Transition out of the reservation's current status.
pub fn transitioned_event(
    reservation: &Reservation,
    transition: TransitionKind,
    to: ReservationStatus,
    occurred_at: NaiveDateTime,
    actor: Actor,
) -> ReservationEvent {
    ReservationEvent::ReservationTransitionedV1(ReservationTransitionedV1 {
        reservation_id: reservation.reservation_id.clone(),
        transition,
        from: reservation.status,
        to,
        occurred_at,
        actor,
        reason: None,
    })
}

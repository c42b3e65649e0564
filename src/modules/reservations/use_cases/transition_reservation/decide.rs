// Pure decision function for lifecycle transitions.
//
// Purpose
// - Validate a transition against the current reservation and produce the event, the row
//   mutations it requires, and the notification intent.
//
// Responsibilities
// - Pairs missing from the transition table are rejected before any other guard.
// - Role guards, then reason and clock guards.
// - Never perform input or output.

use chrono::{Duration, NaiveDateTime};

use crate::modules::reservations::core::check_in::{CheckIn, CheckInStatus};
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::events::v1::reservation_transitioned::ReservationTransitionedV1;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::intents::{NotificationPayload, ReservationIntent};
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::core::transitions::{TransitionKind, target_status};
use crate::modules::reservations::use_cases::transition_reservation::command::TransitionReservation;
use crate::modules::reservations::use_cases::transition_reservation::decision::{
    DecideError, Decision,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPolicy {
    /// How early before the booked start a check-in is accepted.
    pub check_in_grace: Duration,
    /// How late after the booked start a reservation becomes a no-show.
    pub no_show_grace: Duration,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            check_in_grace: Duration::minutes(60),
            no_show_grace: Duration::minutes(30),
        }
    }
}

impl TransitionPolicy {
    pub fn no_show_due_at(&self, reservation: &Reservation) -> NaiveDateTime {
        reservation.slot.starts_at() + self.no_show_grace
    }
}

fn authorize(state: &Reservation, command: &TransitionReservation) -> Result<(), DecideError> {
    let actor = &command.actor;
    let allowed = match command.kind {
        TransitionKind::Approve | TransitionKind::Reject | TransitionKind::CheckIn => {
            actor.is_staff()
        }
        TransitionKind::Cancel => actor.is_staff() || actor.owns(&state.user_id),
        TransitionKind::NoShow | TransitionKind::AutoStart | TransitionKind::CheckOut => {
            actor.is_staff_or_system()
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(DecideError::Forbidden {
            kind: command.kind,
            role: actor.role,
        })
    }
}

fn check_clock(
    state: &Reservation,
    command: &TransitionReservation,
    policy: &TransitionPolicy,
) -> Result<(), DecideError> {
    let starts_at = state.slot.starts_at();
    match command.kind {
        TransitionKind::CheckIn => {
            if state.device_id.is_none() {
                return Err(DecideError::NoDeviceAssigned);
            }
            let opens_at = starts_at - policy.check_in_grace;
            if command.now < opens_at || command.now >= state.slot.ends_at() {
                return Err(DecideError::OutsideCheckInWindow);
            }
        }
        TransitionKind::NoShow if command.now < policy.no_show_due_at(state) => {
            return Err(DecideError::NoShowTooEarly);
        }
        TransitionKind::AutoStart if command.now < starts_at => {
            return Err(DecideError::NotStartedYet);
        }
        _ => {}
    }
    Ok(())
}

fn mutations_for(state: &Reservation, command: &TransitionReservation) -> Vec<Mutation> {
    let device_id = state.device_id.clone();
    match command.kind {
        TransitionKind::Approve | TransitionKind::AutoStart => Vec::new(),
        TransitionKind::Reject | TransitionKind::Cancel => device_id
            .map(|device_id| vec![Mutation::ReleaseHold { device_id }])
            .unwrap_or_default(),
        TransitionKind::NoShow => {
            let mut mutations = vec![Mutation::IncrementNoShow {
                user_id: state.user_id.clone(),
            }];
            if let Some(device_id) = device_id {
                mutations.push(Mutation::ReleaseHold { device_id });
            }
            mutations
        }
        TransitionKind::CheckIn => device_id
            .map(|device_id| {
                vec![
                    Mutation::OccupyDevice {
                        device_id: device_id.clone(),
                    },
                    Mutation::OpenCheckIn(CheckIn {
                        check_in_id: format!("{}-check-in", state.reservation_id),
                        reservation_id: state.reservation_id.clone(),
                        device_id,
                        check_in_time: command.now,
                        check_out_time: None,
                        status: CheckInStatus::CheckedIn,
                        payment_amount: command.payment_amount,
                    }),
                ]
            })
            .unwrap_or_default(),
        TransitionKind::CheckOut => {
            let at = if command.actor.is_system() {
                command.now.min(state.slot.ends_at())
            } else {
                command.now
            };
            let mut mutations = vec![Mutation::CloseCheckIn {
                reservation_id: state.reservation_id.clone(),
                at,
            }];
            if let Some(device_id) = device_id {
                mutations.push(Mutation::FreeDevice { device_id, at });
            }
            mutations
        }
    }
}

pub fn decide_transition(
    state: &Reservation,
    command: TransitionReservation,
    policy: &TransitionPolicy,
) -> Decision {
    let Some(to) = target_status(state.status, command.kind) else {
        return Decision::Rejected {
            reason: DecideError::InvalidTransition {
                from: state.status,
                kind: command.kind,
            },
        };
    };
    if let Err(reason) =
        authorize(state, &command).and_then(|_| check_clock(state, &command, policy))
    {
        return Decision::Rejected { reason };
    }
    let reason = command
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    if command.kind == TransitionKind::Reject && reason.is_none() {
        return Decision::Rejected {
            reason: DecideError::ReasonRequired,
        };
    }

    let mutations = mutations_for(state, &command);
    let event = ReservationEvent::ReservationTransitionedV1(ReservationTransitionedV1 {
        reservation_id: state.reservation_id.clone(),
        transition: command.kind,
        from: state.status,
        to,
        occurred_at: command.now,
        actor: command.actor,
        reason: reason.clone(),
    });
    let next = evolve(Some(state.clone()), event.clone()).unwrap_or_else(|| state.clone());
    let intents = vec![ReservationIntent::NotifyTransitioned {
        transition: command.kind,
        payload: NotificationPayload::for_reservation(&next, command.now, reason),
    }];

    Decision::Accepted {
        events: vec![event],
        mutations,
        intents,
    }
}

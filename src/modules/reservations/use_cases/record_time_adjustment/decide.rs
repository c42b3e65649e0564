// Pure decision function for time adjustments.
//
// The booked slot is never touched. The adjustment is appended to the ledger and the
// reservation's actual start/end shadow fields follow it.

use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::events::v1::reservation_time_adjusted::ReservationTimeAdjustedV1;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::intents::{NotificationPayload, ReservationIntent};
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::reservation::{Reservation, ReservationStatus};
use crate::modules::reservations::core::time_adjustment::TimeAdjustment;
use crate::modules::reservations::use_cases::record_time_adjustment::command::RecordTimeAdjustment;
use crate::modules::reservations::use_cases::record_time_adjustment::decision::{
    DecideError, Decision,
};

pub const ADJUSTABLE: [ReservationStatus; 3] = [
    ReservationStatus::CheckedIn,
    ReservationStatus::InUse,
    ReservationStatus::Completed,
];

pub fn decide_adjustment(state: &Reservation, command: RecordTimeAdjustment) -> Decision {
    if !command.actor.is_staff() {
        return Decision::Rejected {
            reason: DecideError::NotStaff,
        };
    }
    if !ADJUSTABLE.contains(&state.status) {
        return Decision::Rejected {
            reason: DecideError::NotAdjustable(state.status),
        };
    }
    if command.actual_start >= command.actual_end {
        return Decision::Rejected {
            reason: DecideError::InvalidRange,
        };
    }

    let adjustment = TimeAdjustment {
        adjustment_id: command.adjustment_id,
        reservation_id: state.reservation_id.clone(),
        original_start: state.slot.starts_at(),
        original_end: state.slot.ends_at(),
        actual_start: command.actual_start,
        actual_end: command.actual_end,
        reason: command.reason,
        reason_detail: command
            .reason_detail
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        adjusted_by: command.actor.actor_id,
        adjusted_at: command.adjusted_at,
    };
    let event = ReservationEvent::ReservationTimeAdjustedV1(ReservationTimeAdjustedV1 {
        adjustment: adjustment.clone(),
    });
    let next = evolve(Some(state.clone()), event.clone()).unwrap_or_else(|| state.clone());
    let intents = vec![ReservationIntent::NotifyTimeAdjusted {
        payload: NotificationPayload::for_reservation(
            &next,
            adjustment.adjusted_at,
            Some(adjustment.reason.as_str().to_string()),
        ),
    }];

    Decision::Accepted {
        events: vec![event],
        mutations: vec![Mutation::AppendTimeAdjustment(adjustment)],
        intents,
    }
}

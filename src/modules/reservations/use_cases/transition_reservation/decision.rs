use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::actor::ActorRole;
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::intents::ReservationIntent;
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::reservation::ReservationStatus;
use crate::modules::reservations::core::transitions::TransitionKind;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("cannot {kind} a reservation that is {from}")]
    InvalidTransition {
        from: ReservationStatus,
        kind: TransitionKind,
    },

    #[error("{role:?} actors may not {kind} this reservation")]
    Forbidden { kind: TransitionKind, role: ActorRole },

    #[error("a reason is required")]
    ReasonRequired,

    #[error("no device is assigned to the reservation")]
    NoDeviceAssigned,

    #[error("check-in is only possible from the grace window before start until the end")]
    OutsideCheckInWindow,

    #[error("the no-show grace period has not elapsed")]
    NoShowTooEarly,

    #[error("the reservation has not started yet")]
    NotStartedYet,
}

impl From<DecideError> for ReservationError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::Forbidden { .. } => ReservationError::Forbidden(reason.to_string()),
            DecideError::ReasonRequired => ReservationError::Validation(reason.to_string()),
            DecideError::InvalidTransition { .. }
            | DecideError::NoDeviceAssigned
            | DecideError::OutsideCheckInWindow
            | DecideError::NoShowTooEarly
            | DecideError::NotStartedYet => ReservationError::InvalidTransition(reason.to_string()),
        }
    }
}

pub enum Decision {
    Accepted {
        events: Vec<ReservationEvent>,
        mutations: Vec<Mutation>,
        intents: Vec<ReservationIntent>,
    },
    Rejected {
        reason: DecideError,
    },
}

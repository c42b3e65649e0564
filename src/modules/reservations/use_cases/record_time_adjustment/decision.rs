use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::intents::ReservationIntent;
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::reservation::ReservationStatus;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("only staff may adjust times")]
    NotStaff,

    #[error("times cannot be adjusted while the reservation is {0}")]
    NotAdjustable(ReservationStatus),

    #[error("actual start must be before actual end")]
    InvalidRange,
}

impl From<DecideError> for ReservationError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::NotStaff => ReservationError::Forbidden(reason.to_string()),
            DecideError::NotAdjustable(_) => ReservationError::InvalidTransition(reason.to_string()),
            DecideError::InvalidRange => ReservationError::Validation(reason.to_string()),
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

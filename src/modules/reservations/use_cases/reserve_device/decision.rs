use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::intents::ReservationIntent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("at least one unit must be requested")]
    NoUnits,

    #[error("customers may only book for themselves")]
    NotOwner,

    #[error("no device is available for the requested slot")]
    NoDeviceAvailable,

    #[error("requested {requested} units, at most {max} bookable")]
    CapacityExceeded { requested: u32, max: usize },
}

impl From<DecideError> for ReservationError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::NoUnits => ReservationError::Validation(reason.to_string()),
            DecideError::NotOwner => ReservationError::Forbidden(reason.to_string()),
            DecideError::NoDeviceAvailable => ReservationError::Conflict(reason.to_string()),
            DecideError::CapacityExceeded { requested, max } => {
                ReservationError::CapacityExceeded { requested, max }
            }
        }
    }
}

pub enum Decision {
    /// One requested event and one intent per allocated device, in the same order.
    Accepted {
        events: Vec<ReservationEvent>,
        intents: Vec<ReservationIntent>,
        preference_honored: Option<bool>,
    },
    Rejected {
        reason: DecideError,
    },
}

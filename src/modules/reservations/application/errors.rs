use thiserror::Error;

use crate::modules::reservations::core::ports::StoreError;
use crate::modules::reservations::core::time_model::TimeModelError;

pub const CONFLICT_MESSAGE: &str = "already taken, please pick another slot or device";

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{CONFLICT_MESSAGE} ({0})")]
    Conflict(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("capacity exceeded: requested {requested}, at most {max} bookable")]
    CapacityExceeded { requested: u32, max: usize },

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ReservationError {
    /// Conflicts are safe to retry with fresh availability data. Nothing else is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReservationError::Conflict(_))
    }
}

impl From<StoreError> for ReservationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::VersionMismatch { .. }
            | StoreError::Overlap { .. }
            | StoreError::Timeout
            | StoreError::DeviceUnavailable { .. } => ReservationError::Conflict(error.to_string()),
            StoreError::NotFound(what) => ReservationError::NotFound(what),
            StoreError::Backend(message) => ReservationError::Unexpected(message),
        }
    }
}

impl From<TimeModelError> for ReservationError {
    fn from(error: TimeModelError) -> Self {
        ReservationError::Validation(error.to_string())
    }
}

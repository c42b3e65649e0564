use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::reservation::ReservationStatus;
use crate::modules::reservations::core::time_model::BookedSlot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRequestedV1 {
    pub reservation_id: String,
    pub reservation_number: String,
    pub user_id: String,
    pub device_type_id: String,
    pub device_id: Option<String>,
    pub slot: BookedSlot,
    /// `pending`, or `approved` for auto-approved staff bookings.
    pub initial_status: ReservationStatus,
    pub requested_at: NaiveDateTime,
    pub requested_by: String,
}

use chrono::NaiveDateTime;

use crate::modules::reservations::core::actor::Actor;

/// Book `units` devices of one type for the same slot. Hours use the display convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveDevices {
    pub user_id: String,
    pub device_type_id: String,
    pub date: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub preferred_device_id: Option<String>,
    pub units: u32,
    pub actor: Actor,
    pub requested_at: NaiveDateTime,
}

// Physical inventory: device types and the units that can be allocated to reservations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Available,
    InUse,
    Reserved,
    Maintenance,
    Broken,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Available => "available",
            DeviceStatus::InUse => "in_use",
            DeviceStatus::Reserved => "reserved",
            DeviceStatus::Maintenance => "maintenance",
            DeviceStatus::Broken => "broken",
        }
    }

    /// Maintenance and broken units are never offered or occupied.
    pub fn is_in_service(&self) -> bool {
        !matches!(self, DeviceStatus::Maintenance | DeviceStatus::Broken)
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub device_type_id: String,
    /// Unique within the device type; allocation walks devices in ascending order.
    pub device_number: u32,
    pub status: DeviceStatus,
    pub last_used_at: Option<NaiveDateTime>,
}

impl Device {
    /// Whether the unit can take bookings at all. Time conflicts are decided by reservations.
    pub fn is_bookable(&self) -> bool {
        self.status.is_in_service()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalSettings {
    /// Cap on units one party may book of this type at once. `None` means the fleet size.
    pub max_rental_units: Option<u32>,
    pub max_players: u32,
}

impl Default for RentalSettings {
    fn default() -> Self {
        Self {
            max_rental_units: None,
            max_players: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub device_type_id: String,
    pub name: String,
    pub is_rentable: bool,
    pub rental_settings: RentalSettings,
}

impl DeviceType {
    pub fn max_bookable_units(&self, available: usize) -> usize {
        match self.rental_settings.max_rental_units {
            Some(cap) => available.min(cap as usize),
            None => available,
        }
    }
}

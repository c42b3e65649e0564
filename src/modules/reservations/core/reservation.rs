// Reservation aggregate: the booked device-time slot and its lifecycle fields.
//
// Invariant
// - For one device, no two reservations in an active status may have overlapping intervals.
//   The store enforces it on insert; `conflicts_with` is the in-memory form of the same rule.
//
// Boundaries
// - Mutated only through `evolve` with lifecycle events. Never hard-deleted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::modules::reservations::core::time_model::{BookedSlot, Interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    CheckedIn,
    InUse,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Statuses that hold a device-time interval.
    pub const ACTIVE: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::CheckedIn,
        ReservationStatus::InUse,
    ];

    pub const ALL: [ReservationStatus; 8] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::Rejected,
        ReservationStatus::CheckedIn,
        ReservationStatus::InUse,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::InUse => "in_use",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn is_final(&self) -> bool {
        !self.is_active()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub reservation_number: String,
    pub user_id: String,
    pub device_type_id: String,
    pub device_id: Option<String>,
    pub slot: BookedSlot,
    pub status: ReservationStatus,
    pub payment_status: PaymentStatus,
    pub checked_in_at: Option<NaiveDateTime>,
    pub actual_start_time: Option<NaiveDateTime>,
    pub actual_end_time: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub cancelled_by: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub updated_at: NaiveDateTime,
    pub updated_by: String,
}

impl Reservation {
    pub fn interval(&self) -> Interval {
        self.slot.interval()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Two active reservations on the same device whose intervals overlap.
    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        self.reservation_id != other.reservation_id
            && self.is_active()
            && other.is_active()
            && self.device_id.is_some()
            && self.device_id == other.device_id
            && self.interval().overlaps(&other.interval())
    }

    /// Minutes actually played, once both shadow fields are known.
    pub fn actual_duration_minutes(&self) -> Option<i64> {
        match (self.actual_start_time, self.actual_end_time) {
            (Some(start), Some(end)) => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}

/// Human-facing booking number, `GP-YYYYMMDD-NNNN`, where `NNNN` is the 1-based position of
/// the booking among all bookings made for that business date.
pub fn reservation_number(business_date: NaiveDate, sequence: u32) -> String {
    format!("GP-{}-{:04}", business_date.format("%Y%m%d"), sequence)
}

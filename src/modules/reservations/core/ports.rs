// Outbound ports of the reservation core.
//
// Purpose
// - Describe the transactional store the engine needs without naming a technology.
//
// Guarantees required from implementations
// - `insert_reservations` is all-or-nothing and rejects any reservation whose interval overlaps
//   an active reservation on the same device (compare-and-swap on the device interval).
// - Rows arriving without a reservation number are numbered in the same atomic unit with the
//   next sequence of their business date, so numbers never repeat within a date.
// - `commit` is conditioned on the stream version the caller read. A stale version fails with
//   `VersionMismatch` and writes nothing.
// - Mutations carried by a commit are applied in the same atomic unit as the reservation row.
// - Write locks are acquired within a bounded time or fail with `Timeout`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::modules::reservations::core::check_in::CheckIn;
use crate::modules::reservations::core::device::{Device, DeviceStatus, DeviceType};
use crate::modules::reservations::core::events::{RecordedEvent, ReservationEvent};
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::core::time_adjustment::TimeAdjustment;
use crate::modules::reservations::core::time_slot::TimeSlotTemplate;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("version mismatch: expected {expected}, actual {actual}")]
    VersionMismatch { expected: i64, actual: i64 },

    #[error("device {device_id} already holds an overlapping reservation")]
    Overlap { device_id: String },

    #[error("timed out waiting for the store write lock")]
    Timeout,

    #[error("device {device_id} is {status}")]
    DeviceUnavailable {
        device_id: String,
        status: DeviceStatus,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct LoadedReservation {
    pub reservation: Reservation,
    pub version: i64,
}

/// A new reservation row and the event that opens its stream.
#[derive(Debug, Clone)]
pub struct ReservationInsert {
    pub reservation: Reservation,
    pub event: ReservationEvent,
}

#[derive(Debug, Clone)]
pub struct TransitionWrite {
    pub reservation_id: String,
    pub expected_version: i64,
    pub next: Reservation,
    pub events: Vec<ReservationEvent>,
    pub mutations: Vec<Mutation>,
}

#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    async fn device_type(&self, device_type_id: &str) -> Result<DeviceType, StoreError>;

    /// Devices of the type ordered by `device_number` ascending.
    async fn list_devices(&self, device_type_id: &str) -> Result<Vec<Device>, StoreError>;

    async fn list_templates(
        &self,
        device_type_id: &str,
    ) -> Result<Vec<TimeSlotTemplate>, StoreError>;

    /// Manual override from the admin side.
    async fn set_device_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
    ) -> Result<Device, StoreError>;
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Active reservations of the type whose slot starts on a date within `[from, to]`.
    async fn list_active_reservations(
        &self,
        device_type_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Returns the rows as stored, numbers included.
    async fn insert_reservations(
        &self,
        rows: Vec<ReservationInsert>,
    ) -> Result<Vec<Reservation>, StoreError>;

    async fn load_reservation(&self, reservation_id: &str)
    -> Result<LoadedReservation, StoreError>;

    /// Returns the stream version after the write.
    async fn commit(&self, write: TransitionWrite) -> Result<i64, StoreError>;

    /// Reservations the sweeper may move: `approved`, `checked_in`, `in_use`.
    async fn list_in_flight(&self) -> Result<Vec<LoadedReservation>, StoreError>;

    async fn load_check_in(&self, reservation_id: &str) -> Result<Option<CheckIn>, StoreError>;

    async fn list_adjustments(
        &self,
        reservation_id: &str,
    ) -> Result<Vec<TimeAdjustment>, StoreError>;

    async fn audit_trail(&self, reservation_id: &str) -> Result<Vec<RecordedEvent>, StoreError>;

    async fn no_show_count(&self, user_id: &str) -> Result<u32, StoreError>;
}

/// Venue wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

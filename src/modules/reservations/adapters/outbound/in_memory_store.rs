// In memory implementation of the DeviceCatalog and ReservationStore ports.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep every table behind one lock so each write is a single atomic unit.
// - Reject overlapping active intervals per device on insert.
// - Enforce optimistic concurrency on commit by checking the expected stream version.
// - Give up on the write lock after `lock_timeout`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::modules::reservations::core::check_in::CheckIn;
use crate::modules::reservations::core::device::{Device, DeviceStatus, DeviceType};
use crate::modules::reservations::core::events::{RecordedEvent, ReservationEvent};
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::ports::{
    DeviceCatalog, LoadedReservation, ReservationInsert, ReservationStore, StoreError,
    TransitionWrite,
};
use crate::modules::reservations::core::reservation::{
    Reservation, ReservationStatus, reservation_number,
};
use crate::modules::reservations::core::time_adjustment::TimeAdjustment;
use crate::modules::reservations::core::time_slot::TimeSlotTemplate;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(2_000);

#[derive(Default)]
struct Tables {
    device_types: HashMap<String, DeviceType>,
    devices: HashMap<String, Device>,
    templates: Vec<TimeSlotTemplate>,
    reservations: HashMap<String, Reservation>,
    streams: HashMap<String, Vec<RecordedEvent>>,
    check_ins: HashMap<String, CheckIn>,
    adjustments: Vec<TimeAdjustment>,
    no_shows: HashMap<String, u32>,
}

impl Tables {
    fn version_of(&self, reservation_id: &str) -> i64 {
        self.streams
            .get(reservation_id)
            .map(|events| events.len())
            .unwrap_or(0) as i64
    }

    fn check_insert(&self, rows: &[ReservationInsert]) -> Result<(), StoreError> {
        for (index, row) in rows.iter().enumerate() {
            let candidate = &row.reservation;
            if self.reservations.contains_key(&candidate.reservation_id) {
                return Err(StoreError::Backend(format!(
                    "reservation {} already exists",
                    candidate.reservation_id
                )));
            }
            let Some(device_id) = candidate.device_id.as_deref() else {
                continue;
            };
            let device = self
                .devices
                .get(device_id)
                .filter(|d| d.device_type_id == candidate.device_type_id)
                .ok_or_else(|| StoreError::NotFound(format!("device {device_id}")))?;
            if !device.is_bookable() {
                return Err(StoreError::DeviceUnavailable {
                    device_id: device_id.to_string(),
                    status: device.status,
                });
            }
            let earlier_in_batch = rows[..index].iter().map(|r| &r.reservation);
            if self
                .reservations
                .values()
                .chain(earlier_in_batch)
                .any(|existing| candidate.conflicts_with(existing))
            {
                return Err(StoreError::Overlap {
                    device_id: device_id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Numbers are never reused because reservation rows are never deleted.
    fn assign_number(&self, row: &mut ReservationInsert) {
        let business_date = row.reservation.slot.business_date();
        let taken = self
            .reservations
            .values()
            .filter(|r| r.slot.business_date() == business_date)
            .count();
        let number = reservation_number(business_date, taken as u32 + 1);
        if let ReservationEvent::ReservationRequestedV1(requested) = &mut row.event {
            requested.reservation_number = number.clone();
        }
        row.reservation.reservation_number = number;
    }

    fn check_mutations(&self, mutations: &[Mutation]) -> Result<(), StoreError> {
        for mutation in mutations {
            if let Mutation::OccupyDevice { device_id } = mutation {
                let device = self
                    .devices
                    .get(device_id)
                    .ok_or_else(|| StoreError::NotFound(format!("device {device_id}")))?;
                if !matches!(
                    device.status,
                    DeviceStatus::Available | DeviceStatus::Reserved
                ) {
                    return Err(StoreError::DeviceUnavailable {
                        device_id: device_id.clone(),
                        status: device.status,
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::OccupyDevice { device_id } => {
                if let Some(device) = self.devices.get_mut(&device_id) {
                    device.status = DeviceStatus::InUse;
                }
            }
            Mutation::FreeDevice { device_id, at } => {
                if let Some(device) = self.devices.get_mut(&device_id) {
                    if device.status == DeviceStatus::InUse {
                        device.status = DeviceStatus::Available;
                    }
                    device.last_used_at = Some(at);
                }
            }
            Mutation::ReleaseHold { device_id } => {
                if let Some(device) = self.devices.get_mut(&device_id)
                    && device.status == DeviceStatus::Reserved
                {
                    device.status = DeviceStatus::Available;
                }
            }
            Mutation::OpenCheckIn(check_in) => {
                self.check_ins
                    .insert(check_in.reservation_id.clone(), check_in);
            }
            Mutation::CloseCheckIn { reservation_id, at } => {
                if let Some(check_in) = self.check_ins.get_mut(&reservation_id) {
                    check_in.close(at);
                }
            }
            Mutation::IncrementNoShow { user_id } => {
                *self.no_shows.entry(user_id).or_default() += 1;
            }
            Mutation::AppendTimeAdjustment(adjustment) => self.adjustments.push(adjustment),
        }
    }
}

pub struct InMemoryReservationStore {
    tables: RwLock<Tables>,
    lock_timeout: Duration,
    delay_write_ms: AtomicU64,
    offline: bool,
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::with_catalog(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn with_catalog(
        device_types: Vec<DeviceType>,
        devices: Vec<Device>,
        templates: Vec<TimeSlotTemplate>,
    ) -> Self {
        let tables = Tables {
            device_types: device_types
                .into_iter()
                .map(|t| (t.device_type_id.clone(), t))
                .collect(),
            devices: devices
                .into_iter()
                .map(|d| (d.device_id.clone(), d))
                .collect(),
            templates,
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            delay_write_ms: AtomicU64::new(0),
            offline: false,
        }
    }

    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    /// Holds the write lock this long before applying each write.
    pub fn set_delay_write_ms(&self, delay_ms: u64) {
        self.delay_write_ms.store(delay_ms, Ordering::SeqCst);
    }

    pub async fn device(&self, device_id: &str) -> Result<Device, StoreError> {
        self.ensure_online()?;
        self.tables
            .read()
            .await
            .devices
            .get(device_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("device {device_id}")))
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("Reservation store offline".into()));
        }
        Ok(())
    }

    async fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.ensure_online()?;
        let guard = tokio::time::timeout(self.lock_timeout, self.tables.write())
            .await
            .map_err(|_| StoreError::Timeout)?;
        let delay = self.delay_write_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(guard)
    }
}

#[async_trait]
impl DeviceCatalog for InMemoryReservationStore {
    async fn device_type(&self, device_type_id: &str) -> Result<DeviceType, StoreError> {
        self.ensure_online()?;
        self.tables
            .read()
            .await
            .device_types
            .get(device_type_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("device type {device_type_id}")))
    }

    async fn list_devices(&self, device_type_id: &str) -> Result<Vec<Device>, StoreError> {
        self.ensure_online()?;
        let guard = self.tables.read().await;
        let mut devices: Vec<Device> = guard
            .devices
            .values()
            .filter(|d| d.device_type_id == device_type_id)
            .cloned()
            .collect();
        devices.sort_by_key(|d| d.device_number);
        Ok(devices)
    }

    async fn list_templates(
        &self,
        device_type_id: &str,
    ) -> Result<Vec<TimeSlotTemplate>, StoreError> {
        self.ensure_online()?;
        let guard = self.tables.read().await;
        let mut templates: Vec<TimeSlotTemplate> = guard
            .templates
            .iter()
            .filter(|t| t.device_type_id == device_type_id)
            .cloned()
            .collect();
        templates.sort_by_key(|t| t.start_hour);
        Ok(templates)
    }

    async fn set_device_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
    ) -> Result<Device, StoreError> {
        let mut guard = self.write().await?;
        let device = guard
            .devices
            .get_mut(device_id)
            .ok_or_else(|| StoreError::NotFound(format!("device {device_id}")))?;
        device.status = status;
        Ok(device.clone())
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn list_active_reservations(
        &self,
        device_type_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError> {
        self.ensure_online()?;
        let guard = self.tables.read().await;
        let mut rows: Vec<Reservation> = guard
            .reservations
            .values()
            .filter(|r| {
                r.device_type_id == device_type_id
                    && r.is_active()
                    && from <= r.slot.date
                    && r.slot.date <= to
            })
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.slot.starts_at());
        Ok(rows)
    }

    async fn insert_reservations(
        &self,
        rows: Vec<ReservationInsert>,
    ) -> Result<Vec<Reservation>, StoreError> {
        let mut guard = self.write().await?;
        guard.check_insert(&rows)?;
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            if row.reservation.reservation_number.is_empty() {
                guard.assign_number(&mut row);
            }
            stored.push(row.reservation.clone());
            let reservation_id = row.reservation.reservation_id.clone();
            guard.streams.insert(
                reservation_id.clone(),
                vec![RecordedEvent {
                    reservation_id: reservation_id.clone(),
                    version: 1,
                    event: row.event,
                }],
            );
            guard.reservations.insert(reservation_id, row.reservation);
        }
        Ok(stored)
    }

    async fn load_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<LoadedReservation, StoreError> {
        self.ensure_online()?;
        let guard = self.tables.read().await;
        let reservation = guard
            .reservations
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("reservation {reservation_id}")))?;
        Ok(LoadedReservation {
            reservation,
            version: guard.version_of(reservation_id),
        })
    }

    async fn commit(&self, write: TransitionWrite) -> Result<i64, StoreError> {
        let mut guard = self.write().await?;
        if !guard.reservations.contains_key(&write.reservation_id) {
            return Err(StoreError::NotFound(format!(
                "reservation {}",
                write.reservation_id
            )));
        }
        let actual = guard.version_of(&write.reservation_id);
        if actual != write.expected_version {
            return Err(StoreError::VersionMismatch {
                expected: write.expected_version,
                actual,
            });
        }
        guard.check_mutations(&write.mutations)?;
        for mutation in write.mutations {
            guard.apply(mutation);
        }
        let stream = guard
            .streams
            .entry(write.reservation_id.clone())
            .or_default();
        for event in write.events {
            let version = stream.len() as i64 + 1;
            stream.push(RecordedEvent {
                reservation_id: write.reservation_id.clone(),
                version,
                event,
            });
        }
        let version = stream.len() as i64;
        guard.reservations.insert(write.reservation_id, write.next);
        Ok(version)
    }

    async fn list_in_flight(&self) -> Result<Vec<LoadedReservation>, StoreError> {
        self.ensure_online()?;
        let guard = self.tables.read().await;
        let mut rows: Vec<LoadedReservation> = guard
            .reservations
            .values()
            .filter(|r| {
                matches!(
                    r.status,
                    ReservationStatus::Approved
                        | ReservationStatus::CheckedIn
                        | ReservationStatus::InUse
                )
            })
            .map(|r| LoadedReservation {
                reservation: r.clone(),
                version: guard.version_of(&r.reservation_id),
            })
            .collect();
        rows.sort_by_key(|row| row.reservation.slot.starts_at());
        Ok(rows)
    }

    async fn load_check_in(&self, reservation_id: &str) -> Result<Option<CheckIn>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.check_ins.get(reservation_id).cloned())
    }

    async fn list_adjustments(
        &self,
        reservation_id: &str,
    ) -> Result<Vec<TimeAdjustment>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .adjustments
            .iter()
            .filter(|a| a.reservation_id == reservation_id)
            .cloned()
            .collect())
    }

    async fn audit_trail(&self, reservation_id: &str) -> Result<Vec<RecordedEvent>, StoreError> {
        self.ensure_online()?;
        self.tables
            .read()
            .await
            .streams
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("reservation {reservation_id}")))
    }

    async fn no_show_count(&self, user_id: &str) -> Result<u32, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .no_shows
            .get(user_id)
            .copied()
            .unwrap_or(0))
    }
}

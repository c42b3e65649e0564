// AvailabilityEngine: read-only answers to "which devices are free for this slot".
//
// Boundaries
// - Never writes. The allocator re-checks inside the store's atomic insert.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::device::{Device, DeviceType};
use crate::modules::reservations::core::ports::{DeviceCatalog, ReservationStore};
use crate::modules::reservations::core::time_model::{BookedSlot, parse_date};
use crate::modules::reservations::core::time_slot::SlotKind;
use crate::modules::reservations::use_cases::find_available_devices::availability::{
    available_devices, reservation_window,
};
use crate::modules::reservations::use_cases::find_available_devices::query::AvailabilityQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    pub devices: Vec<Device>,
    pub available_count: usize,
    pub max_bookable_units: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub template_id: String,
    pub name: String,
    pub kind: SlotKind,
    pub start_hour: u32,
    pub end_hour: u32,
    pub available_devices: usize,
    pub max_bookable_units: usize,
}

pub struct AvailabilityEngine<TCatalog, TStore>
where
    TCatalog: DeviceCatalog + Send + Sync + 'static,
    TStore: ReservationStore + Send + Sync + 'static,
{
    catalog: Arc<TCatalog>,
    store: Arc<TStore>,
}

impl<TCatalog, TStore> AvailabilityEngine<TCatalog, TStore>
where
    TCatalog: DeviceCatalog + Send + Sync + 'static,
    TStore: ReservationStore + Send + Sync + 'static,
{
    pub fn new(catalog: Arc<TCatalog>, store: Arc<TStore>) -> Self {
        Self { catalog, store }
    }

    /// Unknown types are `NotFound`, types that cannot be rented are a validation error.
    pub async fn rentable_device_type(
        &self,
        device_type_id: &str,
    ) -> Result<DeviceType, ReservationError> {
        let device_type = self.catalog.device_type(device_type_id).await?;
        if !device_type.is_rentable {
            return Err(ReservationError::Validation(format!(
                "device type {device_type_id} is not rentable"
            )));
        }
        Ok(device_type)
    }

    pub async fn available_for_slot(
        &self,
        device_type_id: &str,
        slot: &BookedSlot,
    ) -> Result<Vec<Device>, ReservationError> {
        let devices = self.catalog.list_devices(device_type_id).await?;
        let (from, to) = reservation_window(slot);
        let reservations = self
            .store
            .list_active_reservations(device_type_id, from, to)
            .await?;
        let free = available_devices(devices, &reservations, &slot.interval());
        debug!(
            device_type_id,
            date = %slot.date,
            start_hour = slot.start_hour,
            end_hour = slot.end_hour,
            considered = reservations.len(),
            available = free.len(),
            "computed availability"
        );
        Ok(free)
    }

    pub async fn find_available_devices(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Device>, ReservationError> {
        let slot = query.requested_slot()?;
        self.rentable_device_type(&query.device_type_id).await?;
        self.available_for_slot(&query.device_type_id, &slot).await
    }

    pub async fn count_available(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<usize, ReservationError> {
        Ok(self.find_available_devices(query).await?.len())
    }

    /// `min(available, max rental units)` for the type.
    pub async fn max_bookable_units(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<usize, ReservationError> {
        let slot = query.requested_slot()?;
        let device_type = self.rentable_device_type(&query.device_type_id).await?;
        let available = self
            .available_for_slot(&query.device_type_id, &slot)
            .await?
            .len();
        Ok(device_type.max_bookable_units(available))
    }

    /// Free devices, their count and the bookable cap in one pass.
    pub async fn summarize(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilitySummary, ReservationError> {
        let slot = query.requested_slot()?;
        let device_type = self.rentable_device_type(&query.device_type_id).await?;
        let devices = self.available_for_slot(&query.device_type_id, &slot).await?;
        Ok(AvailabilitySummary {
            available_count: devices.len(),
            max_bookable_units: device_type.max_bookable_units(devices.len()),
            devices,
        })
    }

    /// Every active template of the type with its free device count on `date`.
    pub async fn slot_availability(
        &self,
        device_type_id: &str,
        date: &str,
    ) -> Result<Vec<SlotAvailability>, ReservationError> {
        let business_date = parse_date(date)?;
        let device_type = self.rentable_device_type(device_type_id).await?;
        let templates = self.catalog.list_templates(device_type_id).await?;
        let mut overview = Vec::with_capacity(templates.len());
        for template in templates.into_iter().filter(|t| t.is_active) {
            let slot = template.booked_slot_on(business_date)?;
            let available = self.available_for_slot(device_type_id, &slot).await?.len();
            overview.push(SlotAvailability {
                template_id: template.template_id,
                name: template.name,
                kind: template.kind,
                start_hour: template.start_hour,
                end_hour: template.end_hour,
                available_devices: available,
                max_bookable_units: device_type.max_bookable_units(available),
            });
        }
        Ok(overview)
    }
}

// DeviceAllocator: reserve-if-available.
//
// Flow
// - Read availability, validate capacity, order candidates.
// - Insert through the store's atomic compare-and-swap. When a candidate was claimed in the
//   meantime the store names it; drop it and retry with the remaining candidates.
// - Once fewer candidates than units remain the request fails with a retryable conflict.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::modules::reservations::adapters::outbound::intent_outbox::dispatch_intents;
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::ports::{
    DeviceCatalog, ReservationInsert, ReservationStore, StoreError,
};
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::core::time_model::{BookedSlot, parse_date};
use crate::modules::reservations::use_cases::find_available_devices::handler::AvailabilityEngine;
use crate::modules::reservations::use_cases::reserve_device::command::ReserveDevices;
use crate::modules::reservations::use_cases::reserve_device::decide::{
    check_request, decide_reserve, order_candidates,
};
use crate::modules::reservations::use_cases::reserve_device::decision::Decision;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationReceipt {
    pub reservations: Vec<Reservation>,
    /// `None` when no preference was given.
    pub preference_honored: Option<bool>,
}

impl ReservationReceipt {
    pub fn device_ids(&self) -> Vec<String> {
        self.reservations
            .iter()
            .filter_map(|r| r.device_id.clone())
            .collect()
    }
}

pub struct ReserveDeviceHandler<TCatalog, TStore, TOutbox>
where
    TCatalog: DeviceCatalog + Send + Sync + 'static,
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    availability: Arc<AvailabilityEngine<TCatalog, TStore>>,
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
    auto_approve_staff: bool,
}

impl<TCatalog, TStore, TOutbox> ReserveDeviceHandler<TCatalog, TStore, TOutbox>
where
    TCatalog: DeviceCatalog + Send + Sync + 'static,
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(
        availability: Arc<AvailabilityEngine<TCatalog, TStore>>,
        store: Arc<TStore>,
        outbox: Arc<TOutbox>,
        auto_approve_staff: bool,
    ) -> Self {
        Self {
            availability,
            store,
            outbox,
            auto_approve_staff,
        }
    }

    /// Single-unit booking.
    pub async fn reserve_device(
        &self,
        mut command: ReserveDevices,
    ) -> Result<ReservationReceipt, ReservationError> {
        command.units = 1;
        self.reserve_devices(command).await
    }

    /// All-or-nothing booking of `command.units` devices.
    pub async fn reserve_devices(
        &self,
        command: ReserveDevices,
    ) -> Result<ReservationReceipt, ReservationError> {
        let business_date = parse_date(&command.date)?;
        let slot = BookedSlot::from_display(business_date, command.start_hour, command.end_hour)?;
        let device_type = self
            .availability
            .rentable_device_type(&command.device_type_id)
            .await?;
        let available = self
            .availability
            .available_for_slot(&command.device_type_id, &slot)
            .await?;
        check_request(&command, &device_type, available.len())?;

        let mut candidates = order_candidates(available, command.preferred_device_id.as_deref());
        loop {
            let reservation_ids: Vec<Uuid> = (0..command.units).map(|_| Uuid::now_v7()).collect();
            let (events, intents, preference_honored) = match decide_reserve(
                &command,
                slot,
                &candidates,
                &reservation_ids,
                self.auto_approve_staff,
            ) {
                Decision::Accepted {
                    events,
                    intents,
                    preference_honored,
                } => (events, intents, preference_honored),
                Decision::Rejected { reason } => return Err(reason.into()),
            };

            let reservations: Vec<Reservation> = events
                .iter()
                .cloned()
                .filter_map(|event| evolve(None, event))
                .collect();
            let inserts = reservations
                .iter()
                .cloned()
                .zip(events)
                .map(|(reservation, event)| ReservationInsert { reservation, event })
                .collect();

            match self.store.insert_reservations(inserts).await {
                Ok(reservations) => {
                    for (reservation, mut intent) in reservations.iter().zip(intents) {
                        intent.payload_mut().reservation_number =
                            reservation.reservation_number.clone();
                        if let Err(e) = dispatch_intents(
                            &*self.outbox,
                            &reservation.reservation_id,
                            0,
                            vec![intent],
                        )
                        .await
                        {
                            warn!(
                                reservation_id = %reservation.reservation_id,
                                error = %e,
                                "failed to hand off booking notification"
                            );
                        }
                    }
                    let receipt = ReservationReceipt {
                        reservations,
                        preference_honored,
                    };
                    info!(
                        user_id = %command.user_id,
                        device_type_id = %command.device_type_id,
                        devices = ?receipt.device_ids(),
                        "allocated devices"
                    );
                    return Ok(receipt);
                }
                Err(StoreError::Overlap { device_id })
                | Err(StoreError::DeviceUnavailable { device_id, .. }) => {
                    let before = candidates.len();
                    candidates.retain(|d| d.device_id != device_id);
                    if candidates.len() == before {
                        return Err(ReservationError::Conflict(format!(
                            "device {device_id} was claimed concurrently"
                        )));
                    }
                    debug!(
                        %device_id,
                        remaining = candidates.len(),
                        "lost device to a concurrent booking, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

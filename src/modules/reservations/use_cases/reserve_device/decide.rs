// Pure allocation decisions.
//
// Responsibilities
// - Validate the request against the device type's capacity.
// - Order candidates: the preferred device first when it is still free, then ascending number.
// - Draft one pending (or auto-approved) reservation per unit on the first candidates.
// - Never perform input or output.

use uuid::Uuid;

use crate::modules::reservations::core::device::{Device, DeviceType};
use crate::modules::reservations::core::events::ReservationEvent;
use crate::modules::reservations::core::events::v1::reservation_requested::ReservationRequestedV1;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::intents::{NotificationPayload, ReservationIntent};
use crate::modules::reservations::core::reservation::ReservationStatus;
use crate::modules::reservations::core::time_model::BookedSlot;
use crate::modules::reservations::use_cases::reserve_device::command::ReserveDevices;
use crate::modules::reservations::use_cases::reserve_device::decision::{DecideError, Decision};

pub fn check_request(
    command: &ReserveDevices,
    device_type: &DeviceType,
    available: usize,
) -> Result<(), DecideError> {
    if command.units == 0 {
        return Err(DecideError::NoUnits);
    }
    if !command.actor.is_staff_or_system() && !command.actor.owns(&command.user_id) {
        return Err(DecideError::NotOwner);
    }
    if available == 0 {
        return Err(DecideError::NoDeviceAvailable);
    }
    let max = device_type.max_bookable_units(available);
    if command.units as usize > max {
        return Err(DecideError::CapacityExceeded {
            requested: command.units,
            max,
        });
    }
    Ok(())
}

pub fn order_candidates(mut available: Vec<Device>, preferred: Option<&str>) -> Vec<Device> {
    available.sort_by_key(|d| d.device_number);
    if let Some(position) =
        preferred.and_then(|id| available.iter().position(|d| d.device_id == id))
    {
        let device = available.remove(position);
        available.insert(0, device);
    }
    available
}

pub fn decide_reserve(
    command: &ReserveDevices,
    slot: BookedSlot,
    candidates: &[Device],
    reservation_ids: &[Uuid],
    auto_approve_staff: bool,
) -> Decision {
    let units = command.units as usize;
    if units == 0 {
        return Decision::Rejected {
            reason: DecideError::NoUnits,
        };
    }
    if candidates.len() < units || reservation_ids.len() < units {
        return Decision::Rejected {
            reason: DecideError::NoDeviceAvailable,
        };
    }
    let chosen = &candidates[..units];
    let initial_status = if auto_approve_staff && command.actor.is_staff() {
        ReservationStatus::Approved
    } else {
        ReservationStatus::Pending
    };

    let mut events = Vec::with_capacity(units);
    let mut intents = Vec::with_capacity(units);
    for (device, id) in chosen.iter().zip(reservation_ids) {
        let event = ReservationEvent::ReservationRequestedV1(ReservationRequestedV1 {
            reservation_id: id.to_string(),
            // Numbered by the store when the row is written.
            reservation_number: String::new(),
            user_id: command.user_id.clone(),
            device_type_id: command.device_type_id.clone(),
            device_id: Some(device.device_id.clone()),
            slot,
            initial_status,
            requested_at: command.requested_at,
            requested_by: command.actor.actor_id.clone(),
        });
        if let Some(reservation) = evolve(None, event.clone()) {
            intents.push(ReservationIntent::NotifyRequested {
                payload: NotificationPayload::for_reservation(
                    &reservation,
                    command.requested_at,
                    None,
                ),
            });
        }
        events.push(event);
    }

    let preference_honored = command
        .preferred_device_id
        .as_deref()
        .map(|preferred| chosen.iter().any(|d| d.device_id == preferred));

    Decision::Accepted {
        events,
        intents,
        preference_honored,
    }
}

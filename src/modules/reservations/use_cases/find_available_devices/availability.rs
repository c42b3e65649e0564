// Pure availability computation.
//
// A device is free for a requested interval iff it is in service and none of the active
// reservations assigned to it overlap the interval.

use chrono::{Days, NaiveDate};

use crate::modules::reservations::core::device::Device;
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::core::time_model::{BookedSlot, Interval, intervals_overlap};

pub fn available_devices(
    devices: Vec<Device>,
    reservations: &[Reservation],
    requested: &Interval,
) -> Vec<Device> {
    let mut free: Vec<Device> = devices
        .into_iter()
        .filter(Device::is_bookable)
        .filter(|device| {
            !reservations.iter().any(|r| {
                r.is_active()
                    && r.device_id.as_deref() == Some(device.device_id.as_str())
                    && intervals_overlap(&r.interval(), requested)
            })
        })
        .collect();
    free.sort_by_key(|d| d.device_number);
    free
}

/// Slot start dates whose reservations can reach into `slot`.
///
/// Slots never span more than one midnight, so the day before and the day after are enough.
pub fn reservation_window(slot: &BookedSlot) -> (NaiveDate, NaiveDate) {
    let from = slot.date.checked_sub_days(Days::new(1)).unwrap_or(slot.date);
    let to = slot.date.checked_add_days(Days::new(1)).unwrap_or(slot.date);
    (from, to)
}

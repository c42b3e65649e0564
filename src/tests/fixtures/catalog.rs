// Device types, devices and templates shared by the tests.
//
// Device ids follow `device-<type suffix>-<number>`, so `type-a` yields `device-a-1`, `device-a-2`...

use std::collections::BTreeMap;

use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::modules::reservations::core::device::{Device, DeviceStatus, DeviceType, RentalSettings};
use crate::modules::reservations::core::time_slot::{
    CreditOption, CreditType, SlotKind, TimeSlotTemplate,
};

pub fn device_type(device_type_id: &str) -> DeviceType {
    DeviceType {
        device_type_id: device_type_id.to_string(),
        name: format!("Cabinet {device_type_id}"),
        is_rentable: true,
        rental_settings: RentalSettings::default(),
    }
}

pub fn device(device_type_id: &str, number: u32) -> Device {
    let suffix = device_type_id
        .strip_prefix("type-")
        .unwrap_or(device_type_id);
    Device {
        device_id: format!("device-{suffix}-{number}"),
        device_type_id: device_type_id.to_string(),
        device_number: number,
        status: DeviceStatus::Available,
        last_used_at: None,
    }
}

pub fn devices(device_type_id: &str, count: u32) -> Vec<Device> {
    (1..=count).map(|n| device(device_type_id, n)).collect()
}

/// 22:00 to 05:00 the next morning, written in display hours.
pub fn overnight_template(device_type_id: &str) -> TimeSlotTemplate {
    TimeSlotTemplate {
        template_id: format!("{device_type_id}-overnight"),
        device_type_id: device_type_id.to_string(),
        name: "Overnight".to_string(),
        kind: SlotKind::Overnight,
        start_hour: 22,
        end_hour: 29,
        credit_options: vec![CreditOption {
            credit_type: CreditType::Freeplay,
            hours: vec![4, 7],
            prices: BTreeMap::from([(4, 20_000), (7, 30_000)]),
            fixed_credits: None,
        }],
        enable_two_player: false,
        two_player_surcharge: None,
        is_active: true,
    }
}

pub fn seeded_store_with_cap(max_rental_units: Option<u32>) -> InMemoryReservationStore {
    let mut kind = device_type("type-a");
    kind.rental_settings.max_rental_units = max_rental_units;
    InMemoryReservationStore::with_catalog(
        vec![kind],
        devices("type-a", 3),
        vec![overnight_template("type-a")],
    )
}

/// `type-a` with three available devices and the overnight template.
pub fn seeded_store() -> InMemoryReservationStore {
    seeded_store_with_cap(None)
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::ports::ReservationStore;
use crate::modules::reservations::use_cases::find_available_devices::handler::AvailabilityEngine;
use crate::modules::reservations::use_cases::reserve_device::handler::ReserveDeviceHandler;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::tests::fixtures::catalog::seeded_store;
use crate::tests::fixtures::commands::ReserveDevicesBuilder;

type Handler = ReserveDeviceHandler<
    InMemoryReservationStore,
    InMemoryReservationStore,
    InMemoryDomainOutbox,
>;

fn handler(store: Arc<InMemoryReservationStore>) -> Arc<Handler> {
    let availability = Arc::new(AvailabilityEngine::new(store.clone(), store.clone()));
    Arc::new(ReserveDeviceHandler::new(
        availability,
        store,
        Arc::new(InMemoryDomainOutbox::new()),
        true,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_never_share_a_device() {
    let store = Arc::new(seeded_store());
    store.set_delay_write_ms(5);
    let handler = handler(store.clone());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .reserve_device(ReserveDevicesBuilder::new().user(&format!("user-{i}")).build())
                    .await
            })
        })
        .collect();

    let mut devices = Vec::new();
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(receipt) => devices.extend(receipt.device_ids()),
            Err(ReservationError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    assert_eq!(devices.len(), 3);
    assert_eq!(conflicts, 5);
    let unique: HashSet<_> = devices.iter().collect();
    assert_eq!(unique.len(), 3, "a device was allocated twice: {devices:?}");

    let date = ReserveDevicesBuilder::new().build_slot().date;
    let booked = store
        .list_active_reservations("type-a", date, date)
        .await
        .unwrap();
    assert_eq!(booked.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn competing_preferences_for_one_device_both_succeed_on_different_units() {
    let store = Arc::new(seeded_store());
    store.set_delay_write_ms(5);
    let handler = handler(store);

    let book = |user: &'static str| {
        let handler = handler.clone();
        tokio::spawn(async move {
            handler
                .reserve_device(
                    ReserveDevicesBuilder::new()
                        .user(user)
                        .preferred_device_id("device-a-2")
                        .build(),
                )
                .await
        })
    };
    let (a, b) = tokio::join!(book("user-a"), book("user-b"));
    let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());

    let honored = [a.preference_honored, b.preference_honored];
    assert!(honored.contains(&Some(true)));
    assert!(honored.contains(&Some(false)));
    assert_ne!(a.device_ids(), b.device_ids());
    let holders = [&a, &b]
        .iter()
        .filter(|r| r.device_ids() == vec!["device-a-2"])
        .count();
    assert_eq!(holders, 1);
}

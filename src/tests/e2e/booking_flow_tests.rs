use std::sync::Arc;

use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::find_available_devices::handler::AvailabilityEngine;
use crate::modules::reservations::use_cases::find_available_devices::query::AvailabilityQuery;
use crate::modules::reservations::use_cases::reserve_device::handler::ReserveDeviceHandler;
use crate::modules::reservations::use_cases::transition_reservation::decide::TransitionPolicy;
use crate::modules::reservations::use_cases::transition_reservation::handler::TransitionReservationHandler;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::tests::fixtures::catalog::seeded_store;
use crate::tests::fixtures::commands::{ReserveDevicesBuilder, transition};

type Store = InMemoryReservationStore;

struct Venue {
    availability: Arc<AvailabilityEngine<Store, Store>>,
    reserve: ReserveDeviceHandler<Store, Store, InMemoryDomainOutbox>,
    transitions: TransitionReservationHandler<Store, InMemoryDomainOutbox>,
    outbox: Arc<InMemoryDomainOutbox>,
}

fn venue() -> Venue {
    let store = Arc::new(seeded_store());
    let outbox = Arc::new(InMemoryDomainOutbox::new());
    let availability = Arc::new(AvailabilityEngine::new(store.clone(), store.clone()));
    Venue {
        reserve: ReserveDeviceHandler::new(availability.clone(), store.clone(), outbox.clone(), true),
        transitions: TransitionReservationHandler::new(
            store,
            outbox.clone(),
            TransitionPolicy::default(),
        ),
        availability,
        outbox,
    }
}

fn query(date: &str, start_hour: u32, end_hour: u32) -> AvailabilityQuery {
    AvailabilityQuery {
        device_type_id: "type-a".into(),
        date: date.into(),
        start_hour,
        end_hour,
    }
}

async fn free_ids(venue: &Venue, query: &AvailabilityQuery) -> Vec<String> {
    venue
        .availability
        .find_available_devices(query)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.device_id)
        .collect()
}

#[tokio::test]
async fn a_taken_preference_falls_back_to_the_next_free_device() {
    let venue = venue();
    let slot = query("2025-03-01", 14, 16);
    assert_eq!(
        free_ids(&venue, &slot).await,
        vec!["device-a-1", "device-a-2", "device-a-3"]
    );

    let first = venue
        .reserve
        .reserve_device(ReserveDevicesBuilder::new().build())
        .await
        .unwrap();
    assert_eq!(first.device_ids(), vec!["device-a-1"]);

    let second = venue
        .reserve
        .reserve_device(
            ReserveDevicesBuilder::new()
                .user("user-2")
                .preferred_device_id("device-a-1")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(second.device_ids(), vec!["device-a-2"]);
    assert_eq!(second.preference_honored, Some(false));

    assert_eq!(free_ids(&venue, &slot).await, vec!["device-a-3"]);
    assert_eq!(
        venue.outbox.topics().await,
        vec!["reservation.requested", "reservation.requested"]
    );
}

#[tokio::test]
async fn an_overnight_booking_blocks_late_requests_on_either_date() {
    let venue = venue();
    venue
        .reserve
        .reserve_device(ReserveDevicesBuilder::new().date("2025-01-10").hours(22, 26).build())
        .await
        .unwrap();

    let late_display = query("2025-01-10", 25, 27);
    let next_morning = query("2025-01-11", 1, 3);
    let after = query("2025-01-10", 26, 28);
    for blocked in [&late_display, &next_morning] {
        assert!(!free_ids(&venue, blocked).await.contains(&"device-a-1".to_string()));
    }
    assert!(free_ids(&venue, &after).await.contains(&"device-a-1".to_string()));
}

#[tokio::test]
async fn a_multi_unit_booking_is_all_or_nothing() {
    let venue = venue();
    let pair = venue
        .reserve
        .reserve_devices(ReserveDevicesBuilder::new().units(2).build())
        .await
        .unwrap();
    assert_eq!(pair.device_ids(), vec!["device-a-1", "device-a-2"]);

    let result = venue
        .reserve
        .reserve_devices(ReserveDevicesBuilder::new().user("user-2").units(2).build())
        .await;
    assert!(matches!(
        result,
        Err(ReservationError::CapacityExceeded { requested: 2, max: 1 })
    ));
    assert_eq!(
        free_ids(&venue, &query("2025-03-01", 14, 16)).await,
        vec!["device-a-3"]
    );
}

#[tokio::test]
async fn cancelling_frees_the_device_for_the_next_booking() {
    let venue = venue();
    let receipt = venue
        .reserve
        .reserve_device(ReserveDevicesBuilder::new().build())
        .await
        .unwrap();
    let booked = &receipt.reservations[0];

    venue
        .transitions
        .handle(transition(
            &booked.reservation_id,
            TransitionKind::Cancel,
            Actor::customer("user-1"),
            booked.created_at,
            Some("plans changed"),
        ))
        .await
        .unwrap();

    let again = venue
        .reserve
        .reserve_device(ReserveDevicesBuilder::new().user("user-2").build())
        .await
        .unwrap();
    assert_eq!(again.device_ids(), vec!["device-a-1"]);
}

use std::sync::Arc;

use chrono::Duration;

use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::check_in::CheckInStatus;
use crate::modules::reservations::core::device::DeviceStatus;
use crate::modules::reservations::core::ports::ReservationStore;
use crate::modules::reservations::core::reservation::ReservationStatus;
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::sweep_reservations::handler::{
    AutoTransitionSweeper, SweepReport,
};
use crate::modules::reservations::use_cases::transition_reservation::decide::TransitionPolicy;
use crate::modules::reservations::use_cases::transition_reservation::handler::TransitionReservationHandler;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::tests::fixtures::catalog::seeded_store;
use crate::tests::fixtures::commands::transition;
use crate::tests::fixtures::reservations::{ReservationBuilder, insert_of};

type Store = InMemoryReservationStore;
type Transitions = TransitionReservationHandler<Store, InMemoryDomainOutbox>;

async fn wired(
    status: ReservationStatus,
) -> (Arc<Store>, Arc<Transitions>, AutoTransitionSweeper<Store, InMemoryDomainOutbox>) {
    let store = Arc::new(seeded_store());
    store
        .insert_reservations(vec![insert_of(
            &ReservationBuilder::new().id("r-1").status(status).build(),
        )])
        .await
        .unwrap();
    let transitions = Arc::new(TransitionReservationHandler::new(
        store.clone(),
        Arc::new(InMemoryDomainOutbox::new()),
        TransitionPolicy::default(),
    ));
    let sweeper = AutoTransitionSweeper::new(store.clone(), transitions.clone());
    (store, transitions, sweeper)
}

#[tokio::test]
async fn repeated_sweeps_count_a_no_show_once() {
    let (store, _transitions, sweeper) = wired(ReservationStatus::Approved).await;
    let starts_at = ReservationBuilder::new().build().slot.starts_at();

    let early = sweeper.run(starts_at + Duration::minutes(29)).await.unwrap();
    assert_eq!(early, SweepReport::default());

    let now = starts_at + Duration::minutes(31);
    let reports = [
        sweeper.run(now).await.unwrap(),
        sweeper.run(now).await.unwrap(),
        sweeper.run(now).await.unwrap(),
    ];
    assert_eq!(reports[0].no_shows, 1);
    assert_eq!(reports[1].changed(), 0);
    assert_eq!(reports[2].changed(), 0);

    assert_eq!(store.no_show_count("user-1").await.unwrap(), 1);
    assert_eq!(store.audit_trail("r-1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_sweepers_apply_a_transition_once() {
    let (store, transitions, sweeper) = wired(ReservationStatus::Approved).await;
    let rival = AutoTransitionSweeper::new(store.clone(), transitions);
    store.set_delay_write_ms(10);
    let now = ReservationBuilder::new().build().slot.starts_at() + Duration::minutes(45);

    let (a, b) = tokio::join!(sweeper.run(now), rival.run(now));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.no_shows + b.no_shows, 1);
    assert_eq!(a.failed + b.failed, 0);
    assert_eq!(store.no_show_count("user-1").await.unwrap(), 1);
}

#[tokio::test]
async fn a_checked_in_session_starts_and_completes_on_schedule() {
    let (store, transitions, sweeper) = wired(ReservationStatus::Approved).await;
    let slot = ReservationBuilder::new().build().slot;

    transitions
        .handle(transition(
            "r-1",
            TransitionKind::CheckIn,
            Actor::staff("staff-1"),
            slot.starts_at() - Duration::minutes(10),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(
        store.device("device-a-1").await.unwrap().status,
        DeviceStatus::InUse
    );

    let started = sweeper.run(slot.starts_at() + Duration::minutes(1)).await.unwrap();
    assert_eq!(started.started, 1);
    let loaded = store.load_reservation("r-1").await.unwrap();
    assert_eq!(loaded.reservation.status, ReservationStatus::InUse);

    let finished_at = slot.ends_at() + Duration::minutes(3);
    let completed = sweeper.run(finished_at).await.unwrap();
    assert_eq!(completed.completed, 1);

    let reservation = store.load_reservation("r-1").await.unwrap().reservation;
    assert_eq!(reservation.status, ReservationStatus::Completed);
    assert_eq!(reservation.actual_end_time, Some(slot.ends_at()));
    assert_eq!(reservation.actual_duration_minutes(), Some(130));

    let device = store.device("device-a-1").await.unwrap();
    assert_eq!(device.status, DeviceStatus::Available);
    assert_eq!(device.last_used_at, Some(slot.ends_at()));

    let check_in = store.load_check_in("r-1").await.unwrap().unwrap();
    assert_eq!(check_in.status, CheckInStatus::CheckedOut);
    assert_eq!(check_in.check_out_time, Some(slot.ends_at()));
}

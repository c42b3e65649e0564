use std::sync::Arc;

use tracing::warn;

use crate::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use crate::modules::reservations::core::ports::Clock;
use crate::modules::reservations::use_cases::find_available_devices::handler::AvailabilityEngine;
use crate::modules::reservations::use_cases::record_time_adjustment::handler::RecordTimeAdjustmentHandler;
use crate::modules::reservations::use_cases::reserve_device::handler::ReserveDeviceHandler;
use crate::modules::reservations::use_cases::sweep_reservations::handler::AutoTransitionSweeper;
use crate::modules::reservations::use_cases::transition_reservation::handler::TransitionReservationHandler;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shell::config::SchedulingConfig;

type Store = InMemoryReservationStore;
type Outbox = InMemoryDomainOutbox;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SchedulingConfig>,
    pub clock: Arc<dyn Clock>,
    pub store: Arc<Store>,
    pub outbox: Arc<Outbox>,
    pub availability: Arc<AvailabilityEngine<Store, Store>>,
    pub reserve_handler: Arc<ReserveDeviceHandler<Store, Store, Outbox>>,
    pub transition_handler: Arc<TransitionReservationHandler<Store, Outbox>>,
    pub sweeper: Arc<AutoTransitionSweeper<Store, Outbox>>,
    pub adjustment_handler: Arc<RecordTimeAdjustmentHandler<Store, Outbox>>,
}

impl AppState {
    pub fn in_memory(
        config: SchedulingConfig,
        store: Arc<Store>,
        outbox: Arc<Outbox>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let availability = Arc::new(AvailabilityEngine::new(store.clone(), store.clone()));
        let reserve_handler = Arc::new(ReserveDeviceHandler::new(
            availability.clone(),
            store.clone(),
            outbox.clone(),
            config.auto_approve_staff_bookings,
        ));
        let transition_handler = Arc::new(TransitionReservationHandler::new(
            store.clone(),
            outbox.clone(),
            config.transition_policy(),
        ));
        let sweeper = Arc::new(AutoTransitionSweeper::new(
            store.clone(),
            transition_handler.clone(),
        ));
        let adjustment_handler = Arc::new(RecordTimeAdjustmentHandler::new(
            store.clone(),
            outbox.clone(),
        ));
        Self {
            config: Arc::new(config),
            clock,
            store,
            outbox,
            availability,
            reserve_handler,
            transition_handler,
            sweeper,
            adjustment_handler,
        }
    }

    /// Lazy sweep ahead of reads that depend on up-to-date statuses.
    pub async fn sweep_if_enabled(&self) {
        if !self.config.sweep_on_request {
            return;
        }
        if let Err(e) = self.sweeper.run(self.clock.now()).await {
            warn!(error = %e, "on-request sweep failed");
        }
    }
}

use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::reservations::adapters::outbound::intent_outbox::dispatch_intents;
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::events::RecordedEvent;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::ports::{
    LoadedReservation, ReservationStore, TransitionWrite,
};
use crate::modules::reservations::core::reservation::Reservation;
use crate::modules::reservations::use_cases::transition_reservation::command::TransitionReservation;
use crate::modules::reservations::use_cases::transition_reservation::decide::{
    TransitionPolicy, decide_transition,
};
use crate::modules::reservations::use_cases::transition_reservation::decision::Decision;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub reservation: Reservation,
    pub version: i64,
}

pub struct TransitionReservationHandler<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
    policy: TransitionPolicy,
}

impl<TStore, TOutbox> TransitionReservationHandler<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>, policy: TransitionPolicy) -> Self {
        Self {
            store,
            outbox,
            policy,
        }
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    pub async fn handle(
        &self,
        command: TransitionReservation,
    ) -> Result<TransitionOutcome, ReservationError> {
        let loaded = self.store.load_reservation(&command.reservation_id).await?;
        self.apply(loaded, command).await
    }

    /// Decides against `loaded` and commits conditioned on its version, so a row that moved
    /// since it was read fails with a conflict instead of being processed twice.
    pub async fn apply(
        &self,
        loaded: LoadedReservation,
        command: TransitionReservation,
    ) -> Result<TransitionOutcome, ReservationError> {
        let reservation_id = loaded.reservation.reservation_id.clone();
        let actor_id = command.actor.actor_id.clone();
        let kind = command.kind;
        let from = loaded.reservation.status;

        match decide_transition(&loaded.reservation, command, &self.policy) {
            Decision::Accepted {
                events,
                mutations,
                intents,
            } => {
                let next = events
                    .iter()
                    .cloned()
                    .fold(Some(loaded.reservation), evolve)
                    .ok_or_else(|| {
                        ReservationError::Unexpected(format!(
                            "reservation {reservation_id} vanished while evolving"
                        ))
                    })?;
                let version = self
                    .store
                    .commit(TransitionWrite {
                        reservation_id: reservation_id.clone(),
                        expected_version: loaded.version,
                        next: next.clone(),
                        events,
                        mutations,
                    })
                    .await?;
                if let Err(e) =
                    dispatch_intents(&*self.outbox, &reservation_id, loaded.version, intents).await
                {
                    warn!(%reservation_id, error = %e, "failed to hand off transition notification");
                }
                info!(
                    %reservation_id,
                    transition = %kind,
                    %from,
                    to = %next.status,
                    actor = %actor_id,
                    "reservation transitioned"
                );
                Ok(TransitionOutcome {
                    reservation: next,
                    version,
                })
            }
            Decision::Rejected { reason } => Err(reason.into()),
        }
    }

    /// Every committed change of the reservation, oldest first. Customers only see their own.
    pub async fn audit_trail(
        &self,
        reservation_id: &str,
        actor: &Actor,
    ) -> Result<Vec<RecordedEvent>, ReservationError> {
        let loaded = self.store.load_reservation(reservation_id).await?;
        if !actor.is_staff_or_system() && !actor.owns(&loaded.reservation.user_id) {
            return Err(ReservationError::Forbidden(format!(
                "{} may not read reservation {reservation_id}",
                actor.actor_id
            )));
        }
        Ok(self.store.audit_trail(reservation_id).await?)
    }
}

// AutoTransitionSweeper: one pass over in-flight reservations.
//
// Responsibilities
// - Apply the due time-triggered transition to every row, as the system actor.
// - Each write is conditioned on the version the pass read; a row moved by someone else in
//   the meantime is skipped, not processed twice.
// - One failing row never aborts the pass. It stays due and is retried on the next one.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::actor::Actor;
use crate::modules::reservations::core::ports::ReservationStore;
use crate::modules::reservations::core::transitions::TransitionKind;
use crate::modules::reservations::use_cases::sweep_reservations::decide::due_transition;
use crate::modules::reservations::use_cases::transition_reservation::command::TransitionReservation;
use crate::modules::reservations::use_cases::transition_reservation::handler::TransitionReservationHandler;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub started: usize,
    pub completed: usize,
    pub no_shows: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SweepReport {
    pub fn changed(&self) -> usize {
        self.started + self.completed + self.no_shows
    }
}

pub struct AutoTransitionSweeper<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    store: Arc<TStore>,
    transitions: Arc<TransitionReservationHandler<TStore, TOutbox>>,
}

impl<TStore, TOutbox> AutoTransitionSweeper<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        transitions: Arc<TransitionReservationHandler<TStore, TOutbox>>,
    ) -> Self {
        Self { store, transitions }
    }

    pub async fn run(&self, now: NaiveDateTime) -> Result<SweepReport, ReservationError> {
        let rows = self.store.list_in_flight().await?;
        let policy = *self.transitions.policy();
        let mut report = SweepReport::default();

        for loaded in rows {
            let Some(kind) = due_transition(&loaded.reservation, now, &policy) else {
                continue;
            };
            let reservation_id = loaded.reservation.reservation_id.clone();
            let command = TransitionReservation {
                reservation_id: reservation_id.clone(),
                kind,
                actor: Actor::system(),
                now,
                reason: None,
                payment_amount: None,
            };
            match self.transitions.apply(loaded, command).await {
                Ok(_) => match kind {
                    TransitionKind::AutoStart => report.started += 1,
                    TransitionKind::CheckOut => report.completed += 1,
                    TransitionKind::NoShow => report.no_shows += 1,
                    _ => {}
                },
                Err(ReservationError::Conflict(reason))
                | Err(ReservationError::InvalidTransition(reason)) => {
                    debug!(%reservation_id, transition = %kind, %reason, "sweep row skipped");
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!(%reservation_id, transition = %kind, error = %e, "sweep row failed");
                    report.failed += 1;
                }
            }
        }

        if report.changed() > 0 || report.failed > 0 {
            info!(
                started = report.started,
                completed = report.completed,
                no_shows = report.no_shows,
                skipped = report.skipped,
                failed = report.failed,
                "sweep finished"
            );
        }
        Ok(report)
    }
}

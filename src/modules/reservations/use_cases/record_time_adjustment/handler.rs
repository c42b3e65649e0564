// TimeAdjustmentRecorder.

use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::reservations::adapters::outbound::intent_outbox::dispatch_intents;
use crate::modules::reservations::application::errors::ReservationError;
use crate::modules::reservations::core::evolve::evolve;
use crate::modules::reservations::core::mutations::Mutation;
use crate::modules::reservations::core::ports::{ReservationStore, TransitionWrite};
use crate::modules::reservations::core::time_adjustment::TimeAdjustment;
use crate::modules::reservations::use_cases::record_time_adjustment::command::RecordTimeAdjustment;
use crate::modules::reservations::use_cases::record_time_adjustment::decide::decide_adjustment;
use crate::modules::reservations::use_cases::record_time_adjustment::decision::Decision;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;

pub struct RecordTimeAdjustmentHandler<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> RecordTimeAdjustmentHandler<TStore, TOutbox>
where
    TStore: ReservationStore + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    pub async fn handle(
        &self,
        command: RecordTimeAdjustment,
    ) -> Result<TimeAdjustment, ReservationError> {
        let loaded = self.store.load_reservation(&command.reservation_id).await?;
        let reservation_id = loaded.reservation.reservation_id.clone();

        match decide_adjustment(&loaded.reservation, command) {
            Decision::Accepted {
                events,
                mutations,
                intents,
            } => {
                let adjustment = mutations
                    .iter()
                    .find_map(|m| match m {
                        Mutation::AppendTimeAdjustment(a) => Some(a.clone()),
                        _ => None,
                    })
                    .ok_or_else(|| {
                        ReservationError::Unexpected("adjustment missing from decision".into())
                    })?;
                let next = events
                    .iter()
                    .cloned()
                    .fold(Some(loaded.reservation), evolve)
                    .ok_or_else(|| {
                        ReservationError::Unexpected(format!(
                            "reservation {reservation_id} vanished while evolving"
                        ))
                    })?;
                self.store
                    .commit(TransitionWrite {
                        reservation_id: reservation_id.clone(),
                        expected_version: loaded.version,
                        next,
                        events,
                        mutations,
                    })
                    .await?;
                if let Err(e) =
                    dispatch_intents(&*self.outbox, &reservation_id, loaded.version, intents).await
                {
                    warn!(%reservation_id, error = %e, "failed to hand off adjustment notification");
                }
                info!(
                    %reservation_id,
                    reason = adjustment.reason.as_str(),
                    delta_minutes = adjustment.delta_minutes(),
                    adjusted_by = %adjustment.adjusted_by,
                    "recorded time adjustment"
                );
                Ok(adjustment)
            }
            Decision::Rejected { reason } => Err(reason.into()),
        }
    }

    pub async fn list(
        &self,
        reservation_id: &str,
    ) -> Result<Vec<TimeAdjustment>, ReservationError> {
        self.store.load_reservation(reservation_id).await?;
        Ok(self.store.list_adjustments(reservation_id).await?)
    }
}

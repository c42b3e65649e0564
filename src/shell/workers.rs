use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::shell::state::AppState;

/// Runs the auto-transition sweep on a fixed interval until the runtime shuts down.
pub fn spawn_sweeper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(state.config.sweep_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            every_secs = state.config.sweep_interval_secs,
            "sweeper started"
        );
        loop {
            ticker.tick().await;
            match state.sweeper.run(state.clock.now()).await {
                Ok(report) => debug!(?report, "sweep tick"),
                Err(e) => warn!(error = %e, "sweep failed"),
            }
        }
    })
}

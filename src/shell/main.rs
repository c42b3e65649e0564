use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arcade_reservations::modules::reservations::adapters::outbound::in_memory_store::InMemoryReservationStore;
use arcade_reservations::shared::infrastructure::clock::VenueClock;
use arcade_reservations::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use arcade_reservations::shell::catalog::CatalogSeed;
use arcade_reservations::shell::config::SchedulingConfig;
use arcade_reservations::shell::http::router;
use arcade_reservations::shell::state::AppState;
use arcade_reservations::shell::workers::spawn_sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SchedulingConfig::from_env()?;
    let seed = match config.catalog_path.as_deref() {
        Some(path) => CatalogSeed::load(path)?,
        None => {
            warn!("no catalog configured, starting with an empty inventory");
            CatalogSeed::default()
        }
    };
    info!(
        device_types = seed.device_types.len(),
        devices = seed.devices.len(),
        templates = seed.templates.len(),
        "catalog loaded"
    );

    let store = Arc::new(
        InMemoryReservationStore::with_catalog(seed.device_types, seed.devices, seed.templates)
            .with_lock_timeout(config.allocation_timeout()),
    );
    let outbox = Arc::new(InMemoryDomainOutbox::new());
    let clock = Arc::new(VenueClock::new(config.utc_offset_hours));
    let bind_addr = config.bind_addr.clone();
    let state = AppState::in_memory(config, store, outbox, clock);

    spawn_sweeper(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

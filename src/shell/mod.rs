// Composition root for the reservations context.
//
// - Reads scheduling config from the environment.
// - Wires the in-memory store and outbox into the use case handlers.
// - Spawns the periodic sweeper.

pub mod catalog;
pub mod config;
pub mod http;
pub mod state;
pub mod workers;

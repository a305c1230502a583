#![warn(clippy::unwrap_used)]

pub mod handlers;
pub mod models;
pub mod router;
pub mod server;
pub mod store;

pub use router::simulator_router;
pub use server::ApiServer;
pub use store::SimulatorStore;

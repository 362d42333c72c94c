//! In-memory adapters for tests and deterministic local flows.

mod catalog;
mod daemon;
mod state_store;

pub use catalog::InMemoryDaemonCatalog;
pub use daemon::InMemoryDaemonController;
pub use state_store::InMemoryStateStore;

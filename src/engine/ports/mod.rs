//! Port contracts for engine registration and reporting.
//!
//! Ports define infrastructure-agnostic interfaces used by the engine
//! services: state persistence, daemon control, and daemon discovery.

pub mod catalog;
pub mod daemon;
pub mod state_store;

pub use catalog::DaemonCatalog;
pub use daemon::{DaemonControlError, DaemonControlResult, DaemonController};
pub use state_store::{StateStore, StateStoreError, StateStoreResult};

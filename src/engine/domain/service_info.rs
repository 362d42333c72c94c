//! Runtime report for an installed engine daemon.

use super::EngineId;
use serde::Serialize;

/// Status snapshot of one installed PHP engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineServiceInfo {
    /// Engine identifier (daemon name).
    pub engine_id: EngineId,
    /// Human-readable engine name from the registry.
    pub description: String,
    /// Whether the daemon is currently running.
    pub running: bool,
    /// Whether the daemon starts at boot.
    pub boot_enabled: bool,
    /// Whether the daemon hosts several services.
    pub multiservice: bool,
    /// Administrative URL of the app that manages the daemon.
    pub url: String,
}

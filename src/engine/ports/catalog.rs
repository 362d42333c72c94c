//! Daemon catalog port: which engine daemons are defined on this host.

use super::DaemonControlResult;
use crate::engine::domain::EngineId;
use async_trait::async_trait;

/// Lookup contract for daemon definitions provided by the host framework.
#[async_trait]
pub trait DaemonCatalog: Send + Sync {
    /// Reports whether the host framework has a definition for the daemon.
    ///
    /// # Errors
    ///
    /// Returns [`super::DaemonControlError::Runtime`] when the catalog cannot
    /// be queried.
    async fn is_defined(&self, engine_id: &EngineId) -> DaemonControlResult<bool>;
}

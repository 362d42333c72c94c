//! Daemon control port for PHP engine processes.

use crate::engine::domain::EngineId;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for daemon control operations.
pub type DaemonControlResult<T> = Result<T, DaemonControlError>;

/// Control contract for the daemons that run PHP engines.
///
/// Implementations are supplied by the host framework; this crate never
/// manages processes itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DaemonController: Send + Sync {
    /// Reports whether the daemon package is installed.
    async fn is_installed(&self, engine_id: &EngineId) -> DaemonControlResult<bool>;

    /// Reports whether the daemon is running.
    async fn is_running(&self, engine_id: &EngineId) -> DaemonControlResult<bool>;

    /// Starts (`true`) or stops (`false`) the daemon.
    async fn set_running_state(
        &self,
        engine_id: &EngineId,
        running: bool,
    ) -> DaemonControlResult<()>;

    /// Reports whether the daemon is enabled at boot.
    async fn is_boot_enabled(&self, engine_id: &EngineId) -> DaemonControlResult<bool>;

    /// Reports whether the daemon hosts multiple services.
    async fn is_multiservice(&self, engine_id: &EngineId) -> DaemonControlResult<bool>;

    /// Returns the URL of the administrative app managing the daemon.
    async fn app_url(&self, engine_id: &EngineId) -> DaemonControlResult<String>;
}

/// Errors returned by daemon control adapters.
#[derive(Debug, Clone, Error)]
pub enum DaemonControlError {
    /// The daemon is not installed on this host.
    #[error("daemon {0} is not installed")]
    NotInstalled(EngineId),

    /// The daemon did not answer within the allowed time.
    #[error("daemon {engine_id} did not respond within {after:?}")]
    Timeout {
        /// Engine whose daemon timed out.
        engine_id: EngineId,
        /// Time allowed for the call.
        after: Duration,
    },

    /// Generic control failure (permission denied, start failure, ...).
    #[error("daemon control error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl DaemonControlError {
    /// Wraps a runtime error from a daemon adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}

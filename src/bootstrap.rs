//! Wiring of the engine services over the configured directories.

use crate::config::{ConfigError, EnginesConfig};
use crate::engine::{
    adapters::fs::{DirDaemonCatalog, DirStateStore},
    ports::{DaemonController, StateStoreError},
    services::{DeployedStateService, EngineInventoryService, EngineRegistrationService},
};
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while assembling the engine services.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The state directory could not be opened.
    #[error("failed to open state directory {path}: {reason}")]
    StateDir {
        /// Configured state directory.
        path: Utf8PathBuf,
        /// Underlying store error.
        reason: StateStoreError,
    },

    /// The daemon definition directory could not be opened.
    #[error("failed to open daemon directory {path}: {reason}")]
    DaemonDir {
        /// Configured daemon directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        reason: Arc<std::io::Error>,
    },
}

/// The engine services sharing one registry, state directory and daemon
/// controller.
pub struct EngineServices<D>
where
    D: DaemonController,
{
    /// Registration and engine validation.
    pub registration: EngineRegistrationService<DirStateStore, D>,
    /// Deployed-state aggregation.
    pub deployed_state: DeployedStateService<DirStateStore>,
    /// Supported and installed engine reporting.
    pub inventory: EngineInventoryService<DirDaemonCatalog, D>,
}

impl<D> EngineServices<D>
where
    D: DaemonController,
{
    /// Opens the configured directories and builds the services around the
    /// host framework's daemon controller.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the configuration is invalid or a
    /// configured directory cannot be opened.
    pub fn open(config: &EnginesConfig, daemons: Arc<D>) -> Result<Self, BootstrapError> {
        config.validate()?;
        let registry = Arc::new(config.registry()?);

        let store = Arc::new(DirStateStore::open(&config.state_dir).map_err(|reason| {
            BootstrapError::StateDir {
                path: config.state_dir.clone(),
                reason,
            }
        })?);
        let catalog = Arc::new(DirDaemonCatalog::open(&config.daemon_dir).map_err(|err| {
            BootstrapError::DaemonDir {
                path: config.daemon_dir.clone(),
                reason: Arc::new(err),
            }
        })?);

        info!(
            state_dir = %config.state_dir,
            daemon_dir = %config.daemon_dir,
            engines = registry.len(),
            "engine services ready"
        );

        Ok(Self {
            registration: EngineRegistrationService::new(
                Arc::clone(&store),
                Arc::clone(&daemons),
                Arc::clone(&registry),
            )
            .with_activation_timeout(config.activation_timeout()),
            deployed_state: DeployedStateService::new(store),
            inventory: EngineInventoryService::new(catalog, daemons, registry),
        })
    }
}

//! Service layer for reporting supported and installed engines.

use crate::engine::{
    domain::{EngineId, EngineRegistry, EngineServiceInfo},
    ports::{DaemonCatalog, DaemonControlError, DaemonController},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for engine inventory queries.
#[derive(Debug, Error)]
pub enum EngineInventoryServiceError {
    /// A daemon catalog or controller query failed.
    #[error(transparent)]
    Daemon(#[from] DaemonControlError),
}

/// Result type for engine inventory queries.
pub type EngineInventoryServiceResult<T> = Result<T, EngineInventoryServiceError>;

/// Reports which supported engines exist on the host and their state.
#[derive(Clone)]
pub struct EngineInventoryService<C, D>
where
    C: DaemonCatalog,
    D: DaemonController,
{
    catalog: Arc<C>,
    daemons: Arc<D>,
    registry: Arc<EngineRegistry>,
}

impl<C, D> EngineInventoryService<C, D>
where
    C: DaemonCatalog,
    D: DaemonController,
{
    /// Creates an inventory service.
    #[must_use]
    pub const fn new(catalog: Arc<C>, daemons: Arc<D>, registry: Arc<EngineRegistry>) -> Self {
        Self {
            catalog,
            daemons,
            registry,
        }
    }

    /// Returns the display name of every supported engine.
    #[must_use]
    pub fn engines(&self) -> BTreeMap<EngineId, String> {
        self.registry
            .iter()
            .map(|engine| (engine.id().clone(), engine.display_name().to_owned()))
            .collect()
    }

    /// Returns the port of every supported engine, `0` for none.
    #[must_use]
    pub fn ports(&self) -> BTreeMap<EngineId, u16> {
        self.registry
            .iter()
            .map(|engine| (engine.id().clone(), engine.port()))
            .collect()
    }

    /// Returns the supported engines the host framework defines a daemon for.
    ///
    /// # Errors
    ///
    /// Returns [`EngineInventoryServiceError::Daemon`] when the catalog
    /// cannot be queried.
    pub async fn available_engines(&self) -> EngineInventoryServiceResult<Vec<EngineId>> {
        let mut available = Vec::new();
        for engine in self.registry.iter() {
            if self.catalog.is_defined(engine.id()).await? {
                available.push(engine.id().clone());
            }
        }
        Ok(available)
    }

    /// Reports daemon state for every available engine that is installed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineInventoryServiceError::Daemon`] when a catalog or
    /// daemon query fails.
    pub async fn services_info(&self) -> EngineInventoryServiceResult<Vec<EngineServiceInfo>> {
        let mut report = Vec::new();
        for engine_id in self.available_engines().await? {
            if !self.daemons.is_installed(&engine_id).await? {
                continue;
            }
            let description = self
                .registry
                .get(&engine_id)
                .map(|engine| engine.display_name().to_owned())
                .unwrap_or_default();
            report.push(EngineServiceInfo {
                running: self.daemons.is_running(&engine_id).await?,
                boot_enabled: self.daemons.is_boot_enabled(&engine_id).await?,
                multiservice: self.daemons.is_multiservice(&engine_id).await?,
                url: self.daemons.app_url(&engine_id).await?,
                description,
                engine_id,
            });
        }
        Ok(report)
    }
}

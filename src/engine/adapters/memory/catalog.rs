//! In-memory daemon catalog.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::engine::{
    domain::EngineId,
    ports::{DaemonCatalog, DaemonControlError, DaemonControlResult},
};

/// Catalog holding an explicit set of defined daemons.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDaemonCatalog {
    defined: Arc<RwLock<BTreeSet<EngineId>>>,
}

impl InMemoryDaemonCatalog {
    /// Creates a catalog with the given daemons defined.
    #[must_use]
    pub fn with_defined(engines: impl IntoIterator<Item = EngineId>) -> Self {
        Self {
            defined: Arc::new(RwLock::new(engines.into_iter().collect())),
        }
    }

    /// Marks a daemon as defined.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn define(&self, engine_id: EngineId) -> DaemonControlResult<()> {
        let mut defined = self
            .defined
            .write()
            .map_err(|err| DaemonControlError::runtime(std::io::Error::other(err.to_string())))?;
        defined.insert(engine_id);
        Ok(())
    }
}

#[async_trait]
impl DaemonCatalog for InMemoryDaemonCatalog {
    async fn is_defined(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        let defined = self
            .defined
            .read()
            .map_err(|err| DaemonControlError::runtime(std::io::Error::other(err.to_string())))?;
        Ok(defined.contains(engine_id))
    }
}

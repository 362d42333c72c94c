//! Read-side aggregation of registrations into per-engine consumers.

use crate::engine::{
    domain::{DeployedState, DeployedStateEntry, EngineId},
    ports::{StateStore, StateStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Service-level errors for deployed-state queries.
#[derive(Debug, Error)]
pub enum DeployedStateServiceError {
    /// The state store could not be listed.
    #[error(transparent)]
    Store(#[from] StateStoreError),
}

/// Result type for deployed-state queries.
pub type DeployedStateServiceResult<T> = Result<T, DeployedStateServiceError>;

/// Answers "which applications use which engine".
///
/// The service never writes to the state store. Records that cannot be read
/// or decoded are skipped so one bad file does not hide the others.
#[derive(Clone)]
pub struct DeployedStateService<S>
where
    S: StateStore,
{
    store: Arc<S>,
}

impl<S> DeployedStateService<S>
where
    S: StateStore,
{
    /// Creates a deployed-state service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns every binding of every readable registration, grouped by
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns [`DeployedStateServiceError::Store`] when the records cannot
    /// be listed.
    pub async fn deployed_state(&self) -> DeployedStateServiceResult<DeployedState> {
        let mut files = self.store.list().await?;
        files.sort_unstable();

        let mut registrations = Vec::with_capacity(files.len());
        for file in &files {
            match self.store.read(file).await {
                Ok(registration) => registrations.push(registration),
                Err(err) if err.is_record_local() => {
                    warn!(file = %file, error = %err, "skipping malformed registration record");
                }
                Err(err) => {
                    warn!(file = %file, error = %err, "skipping unreadable registration record");
                }
            }
        }

        Ok(DeployedState::from_registrations(&registrations))
    }

    /// Returns the bindings that use one engine, empty when none do.
    ///
    /// # Errors
    ///
    /// Returns [`DeployedStateServiceError::Store`] when the records cannot
    /// be listed.
    pub async fn deployed_state_for(
        &self,
        engine_id: &EngineId,
    ) -> DeployedStateServiceResult<Vec<DeployedStateEntry>> {
        Ok(self.deployed_state().await?.take_entries_for(engine_id))
    }
}

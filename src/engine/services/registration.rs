//! Service layer for engine registration.
//!
//! Provides [`EngineRegistrationService`] which validates engine names,
//! persists per-application registrations, and makes sure every engine an
//! application registers is running.

use crate::engine::{
    domain::{
        AppName, EngineBindings, EngineDomainError, EngineId, EngineRegistry, Registration,
    },
    ports::{
        DaemonControlError, DaemonControlResult, DaemonController, StateStore, StateStoreError,
    },
};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Time allowed for each daemon control call during activation.
pub const DEFAULT_ACTIVATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Request payload for registering an application's engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterEnginesRequest {
    app_name: String,
    app_description: String,
    engines: BTreeMap<String, String>,
}

impl RegisterEnginesRequest {
    /// Creates a request with no engine bindings.
    #[must_use]
    pub fn new(app_name: impl Into<String>, app_description: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_description: app_description.into(),
            engines: BTreeMap::new(),
        }
    }

    /// Binds `key` to an engine. A repeated key replaces the earlier binding.
    #[must_use]
    pub fn with_engine(mut self, key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        self.engines.insert(key.into(), engine_id.into());
        self
    }

    /// Adds several key-to-engine bindings.
    #[must_use]
    pub fn with_engines<K, V>(mut self, engines: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.engines.extend(
            engines
                .into_iter()
                .map(|(key, engine_id)| (key.into(), engine_id.into())),
        );
        self
    }
}

/// An engine daemon could not be confirmed running or started.
#[derive(Debug, Clone, Error)]
#[error("could not activate engine {engine_id}: {cause}")]
pub struct EngineActivationError {
    /// Engine that failed to activate.
    pub engine_id: EngineId,
    /// Daemon controller failure.
    pub cause: DaemonControlError,
}

/// Service-level errors for engine registration.
#[derive(Debug, Error)]
pub enum EngineRegistrationServiceError {
    /// Domain validation failed; nothing was written.
    #[error(transparent)]
    Domain(#[from] EngineDomainError),
    /// The state store rejected the record.
    #[error(transparent)]
    Store(#[from] StateStoreError),
    /// The record was written but an engine could not be activated.
    #[error(transparent)]
    Activation(#[from] EngineActivationError),
}

/// Result type for engine registration service operations.
pub type EngineRegistrationServiceResult<T> = Result<T, EngineRegistrationServiceError>;

/// Engine registration orchestration service.
#[derive(Clone)]
pub struct EngineRegistrationService<S, D>
where
    S: StateStore,
    D: DaemonController,
{
    store: Arc<S>,
    daemons: Arc<D>,
    registry: Arc<EngineRegistry>,
    activation_timeout: Duration,
}

impl<S, D> EngineRegistrationService<S, D>
where
    S: StateStore,
    D: DaemonController,
{
    /// Creates a registration service using [`DEFAULT_ACTIVATION_TIMEOUT`].
    #[must_use]
    pub const fn new(store: Arc<S>, daemons: Arc<D>, registry: Arc<EngineRegistry>) -> Self {
        Self {
            store,
            daemons,
            registry,
            activation_timeout: DEFAULT_ACTIVATION_TIMEOUT,
        }
    }

    /// Sets the time allowed for each daemon control call.
    #[must_use]
    pub const fn with_activation_timeout(mut self, timeout: Duration) -> Self {
        self.activation_timeout = timeout;
        self
    }

    /// Returns the supported-engine registry.
    #[must_use]
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Checks an engine identifier against the supported-engine registry.
    ///
    /// Empty input means "not specified" and passes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::UnsupportedEngine`] when the identifier
    /// is not supported.
    pub fn validate_engine(&self, engine_id: &str) -> Result<(), EngineDomainError> {
        self.registry.validate(engine_id)
    }

    /// Registers an application's engines, replacing any earlier
    /// registration for the same application, then starts every engine
    /// that is not running.
    ///
    /// Registry membership is not enforced; callers that need it run
    /// [`Self::validate_engine`] first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineRegistrationServiceError::Domain`] for an invalid
    /// application name or empty engine identifier (nothing is written),
    /// [`EngineRegistrationServiceError::Store`] when the record cannot be
    /// written, or [`EngineRegistrationServiceError::Activation`] with the
    /// first engine that failed to start. Activation failures leave the
    /// written record in place.
    pub async fn register(
        &self,
        request: RegisterEnginesRequest,
    ) -> EngineRegistrationServiceResult<Registration> {
        let RegisterEnginesRequest {
            app_name,
            app_description,
            engines,
        } = request;

        let validated_name = AppName::new(app_name)?;
        let bindings = engines
            .into_iter()
            .map(|(key, engine_id)| EngineId::new(engine_id).map(|id| (key, id)))
            .collect::<Result<EngineBindings, EngineDomainError>>()?;

        let registration = Registration::new(validated_name, app_description, bindings);
        self.store.write(&registration).await?;
        info!(
            app = %registration.app_name(),
            bindings = registration.engines().len(),
            "engine registration stored"
        );

        self.ensure_running(&registration).await?;
        Ok(registration)
    }

    /// Attempts every engine and reports the first failure.
    async fn ensure_running(
        &self,
        registration: &Registration,
    ) -> Result<(), EngineActivationError> {
        let mut first_failure = None;
        for engine_id in registration.distinct_engines() {
            if let Err(err) = self.activate(engine_id).await {
                warn!(
                    app = %registration.app_name(),
                    engine = %engine_id,
                    error = %err.cause,
                    "engine activation failed"
                );
                first_failure.get_or_insert(err);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    async fn activate(&self, engine_id: &EngineId) -> Result<(), EngineActivationError> {
        let running = self
            .bounded(engine_id, self.daemons.is_running(engine_id))
            .await
            .map_err(|cause| activation_error(engine_id, cause))?;
        if running {
            debug!(engine = %engine_id, "engine already running");
            return Ok(());
        }

        self.bounded(engine_id, self.daemons.set_running_state(engine_id, true))
            .await
            .map_err(|cause| activation_error(engine_id, cause))?;
        info!(engine = %engine_id, "engine started");
        Ok(())
    }

    async fn bounded<T>(
        &self,
        engine_id: &EngineId,
        call: impl Future<Output = DaemonControlResult<T>>,
    ) -> DaemonControlResult<T> {
        tokio::time::timeout(self.activation_timeout, call)
            .await
            .map_err(|_| DaemonControlError::Timeout {
                engine_id: engine_id.clone(),
                after: self.activation_timeout,
            })?
    }
}

fn activation_error(engine_id: &EngineId, cause: DaemonControlError) -> EngineActivationError {
    EngineActivationError {
        engine_id: engine_id.clone(),
        cause,
    }
}

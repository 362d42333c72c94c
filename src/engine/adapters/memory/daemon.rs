//! In-memory daemon controller.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::engine::{
    domain::EngineId,
    ports::{DaemonControlError, DaemonControlResult, DaemonController},
};

/// In-memory daemon controller.
///
/// This adapter models daemon state without touching real processes. It
/// records every start request so tests can assert on activation attempts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDaemonController {
    state: Arc<RwLock<InMemoryDaemonState>>,
}

#[derive(Debug, Default)]
struct InMemoryDaemonState {
    installed: HashSet<EngineId>,
    running: HashSet<EngineId>,
    boot_enabled: HashSet<EngineId>,
    multiservice: HashSet<EngineId>,
    app_urls: HashMap<EngineId, String>,
    start_failures: HashMap<EngineId, String>,
    start_requests: Vec<EngineId>,
}

impl InMemoryDaemonController {
    /// Creates a controller with no installed daemons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> DaemonControlResult<RwLockReadGuard<'_, InMemoryDaemonState>> {
        self.state
            .read()
            .map_err(|err| DaemonControlError::runtime(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> DaemonControlResult<RwLockWriteGuard<'_, InMemoryDaemonState>> {
        self.state
            .write()
            .map_err(|err| DaemonControlError::runtime(std::io::Error::other(err.to_string())))
    }

    /// Installs a stopped daemon.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn install(&self, engine_id: EngineId) -> DaemonControlResult<()> {
        self.write_state()?.installed.insert(engine_id);
        Ok(())
    }

    /// Installs a daemon that is already running.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn install_running(&self, engine_id: EngineId) -> DaemonControlResult<()> {
        let mut state = self.write_state()?;
        state.installed.insert(engine_id.clone());
        state.running.insert(engine_id);
        Ok(())
    }

    /// Sets the boot flag, multiservice flag and app URL reported for a daemon.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn describe(
        &self,
        engine_id: &EngineId,
        boot_enabled: bool,
        multiservice: bool,
        app_url: impl Into<String>,
    ) -> DaemonControlResult<()> {
        let mut state = self.write_state()?;
        if boot_enabled {
            state.boot_enabled.insert(engine_id.clone());
        } else {
            state.boot_enabled.remove(engine_id);
        }
        if multiservice {
            state.multiservice.insert(engine_id.clone());
        } else {
            state.multiservice.remove(engine_id);
        }
        state.app_urls.insert(engine_id.clone(), app_url.into());
        Ok(())
    }

    /// Makes every later start request for the daemon fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn fail_start(
        &self,
        engine_id: EngineId,
        message: impl Into<String>,
    ) -> DaemonControlResult<()> {
        self.write_state()?
            .start_failures
            .insert(engine_id, message.into());
        Ok(())
    }

    /// Returns every start request received so far, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonControlError::Runtime`] when lock acquisition fails.
    pub fn start_requests(&self) -> DaemonControlResult<Vec<EngineId>> {
        Ok(self.read_state()?.start_requests.clone())
    }
}

#[async_trait]
impl DaemonController for InMemoryDaemonController {
    async fn is_installed(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        Ok(self.read_state()?.installed.contains(engine_id))
    }

    async fn is_running(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        Ok(self.read_state()?.running.contains(engine_id))
    }

    async fn set_running_state(
        &self,
        engine_id: &EngineId,
        running: bool,
    ) -> DaemonControlResult<()> {
        let mut state = self.write_state()?;
        if !state.installed.contains(engine_id) {
            return Err(DaemonControlError::NotInstalled(engine_id.clone()));
        }

        if !running {
            state.running.remove(engine_id);
            return Ok(());
        }

        state.start_requests.push(engine_id.clone());
        if let Some(message) = state.start_failures.get(engine_id) {
            return Err(DaemonControlError::runtime(std::io::Error::other(
                message.clone(),
            )));
        }
        state.running.insert(engine_id.clone());
        Ok(())
    }

    async fn is_boot_enabled(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        Ok(self.read_state()?.boot_enabled.contains(engine_id))
    }

    async fn is_multiservice(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        Ok(self.read_state()?.multiservice.contains(engine_id))
    }

    async fn app_url(&self, engine_id: &EngineId) -> DaemonControlResult<String> {
        Ok(self
            .read_state()?
            .app_urls
            .get(engine_id)
            .cloned()
            .unwrap_or_default())
    }
}

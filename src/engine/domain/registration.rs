//! Per-application engine registration.

use super::{AppName, DeployedStateEntry, EngineId};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from caller-defined logical keys to the engines they use.
///
/// Keys are tags chosen by the application (e.g. `default`, `webmail`);
/// several keys may name the same engine.
pub type EngineBindings = BTreeMap<String, EngineId>;

/// An application's declared engine usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    app_name: AppName,
    app_description: String,
    engines: EngineBindings,
}

impl Registration {
    /// Creates a registration.
    #[must_use]
    pub fn new(
        app_name: AppName,
        app_description: impl Into<String>,
        engines: EngineBindings,
    ) -> Self {
        Self {
            app_name,
            app_description: app_description.into(),
            engines,
        }
    }

    /// Returns the registering application's name.
    #[must_use]
    pub const fn app_name(&self) -> &AppName {
        &self.app_name
    }

    /// Returns the application's description.
    #[must_use]
    pub fn app_description(&self) -> &str {
        &self.app_description
    }

    /// Returns the key-to-engine bindings.
    #[must_use]
    pub const fn engines(&self) -> &EngineBindings {
        &self.engines
    }

    /// Returns each engine named by the bindings once, in identifier order.
    #[must_use]
    pub fn distinct_engines(&self) -> BTreeSet<&EngineId> {
        self.engines.values().collect()
    }

    /// Expands the registration into one deployed-state entry per binding.
    pub fn deployed_entries(&self) -> impl Iterator<Item = DeployedStateEntry> + '_ {
        self.engines.iter().map(|(key, engine_id)| {
            DeployedStateEntry::new(
                self.app_name.clone(),
                self.app_description.clone(),
                key.clone(),
                engine_id.clone(),
            )
        })
    }
}

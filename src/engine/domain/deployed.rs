//! Read-side projection of which applications use which engines.

use super::{AppName, EngineId, Registration};
use serde::Serialize;
use std::collections::BTreeMap;

/// One application binding to one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedStateEntry {
    app_name: AppName,
    app_description: String,
    engine_key: String,
    engine_id: EngineId,
}

impl DeployedStateEntry {
    /// Creates a deployed-state entry.
    #[must_use]
    pub const fn new(
        app_name: AppName,
        app_description: String,
        engine_key: String,
        engine_id: EngineId,
    ) -> Self {
        Self {
            app_name,
            app_description,
            engine_key,
            engine_id,
        }
    }

    /// Returns the application name.
    #[must_use]
    pub const fn app_name(&self) -> &AppName {
        &self.app_name
    }

    /// Returns the application description.
    #[must_use]
    pub fn app_description(&self) -> &str {
        &self.app_description
    }

    /// Returns the caller-defined key the engine is bound under.
    #[must_use]
    pub fn engine_key(&self) -> &str {
        &self.engine_key
    }

    /// Returns the engine identifier.
    #[must_use]
    pub const fn engine_id(&self) -> &EngineId {
        &self.engine_id
    }
}

/// Deployed-state entries grouped by engine.
///
/// Buckets iterate in engine identifier order and entries within a bucket
/// are ordered by application name, then engine key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeployedState {
    buckets: BTreeMap<EngineId, Vec<DeployedStateEntry>>,
}

impl DeployedState {
    /// Groups the bindings of every registration by engine.
    #[must_use]
    pub fn from_registrations<'a>(
        registrations: impl IntoIterator<Item = &'a Registration>,
    ) -> Self {
        let mut buckets: BTreeMap<EngineId, Vec<DeployedStateEntry>> = BTreeMap::new();
        for entry in registrations
            .into_iter()
            .flat_map(Registration::deployed_entries)
        {
            buckets
                .entry(entry.engine_id().clone())
                .or_default()
                .push(entry);
        }
        for entries in buckets.values_mut() {
            entries.sort_by(|left, right| {
                (left.app_name(), left.engine_key()).cmp(&(right.app_name(), right.engine_key()))
            });
        }
        Self { buckets }
    }

    /// Returns the entries for one engine, empty when nobody uses it.
    #[must_use]
    pub fn entries_for(&self, engine_id: &EngineId) -> &[DeployedStateEntry] {
        self.buckets
            .get(engine_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Removes and returns the entries for one engine.
    #[must_use]
    pub fn take_entries_for(mut self, engine_id: &EngineId) -> Vec<DeployedStateEntry> {
        self.buckets.remove(engine_id).unwrap_or_default()
    }

    /// Iterates over engines that have at least one entry.
    pub fn engines(&self) -> impl Iterator<Item = &EngineId> {
        self.buckets.keys()
    }

    /// Iterates over `(engine, entries)` buckets.
    pub fn iter(&self) -> impl Iterator<Item = (&EngineId, &[DeployedStateEntry])> {
        self.buckets
            .iter()
            .map(|(engine_id, entries)| (engine_id, entries.as_slice()))
    }

    /// Returns the total number of entries across all engines.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns whether no application uses any engine.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Consumes the projection and returns the underlying mapping.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<EngineId, Vec<DeployedStateEntry>> {
        self.buckets
    }
}

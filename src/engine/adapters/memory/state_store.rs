//! In-memory state store keeping raw record contents.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::engine::{
    adapters::record::{decode_record, encode_record, is_state_file_name, state_file_name},
    domain::{AppName, Registration},
    ports::{StateStore, StateStoreError, StateStoreResult},
};

/// Thread-safe in-memory state store.
///
/// Records are held in their encoded form so decoding behaves exactly as
/// with the directory adapter, including for seeded malformed contents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    files: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw file contents under `file_name`, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Io`] when lock acquisition fails.
    pub fn insert_raw(
        &self,
        file_name: impl Into<String>,
        contents: impl Into<String>,
    ) -> StateStoreResult<()> {
        let mut files = self.files.write().map_err(lock_error)?;
        files.insert(file_name.into(), contents.into());
        Ok(())
    }

    /// Returns the raw contents of an application's record, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Io`] when lock acquisition fails.
    pub fn raw_record(&self, app_name: &AppName) -> StateStoreResult<Option<String>> {
        let files = self.files.read().map_err(lock_error)?;
        Ok(files.get(&state_file_name(app_name)).cloned())
    }
}

fn lock_error(err: impl std::fmt::Display) -> StateStoreError {
    std::io::Error::other(err.to_string()).into()
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn write(&self, registration: &Registration) -> StateStoreResult<()> {
        let contents = encode_record(registration)?;
        let mut files = self.files.write().map_err(lock_error)?;
        files.insert(state_file_name(registration.app_name()), contents);
        Ok(())
    }

    async fn list(&self) -> StateStoreResult<Vec<String>> {
        let files = self.files.read().map_err(lock_error)?;
        Ok(files
            .keys()
            .filter(|name| is_state_file_name(name))
            .cloned()
            .collect())
    }

    async fn read(&self, file_name: &str) -> StateStoreResult<Registration> {
        let stored = {
            let files = self.files.read().map_err(lock_error)?;
            files.get(file_name).cloned()
        };
        let contents = stored.ok_or_else(|| {
            StateStoreError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no state record named {file_name}"),
            ))
        })?;
        decode_record(file_name, &contents)
    }
}

//! State store port for per-application registration records.

use crate::engine::domain::Registration;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for state store operations.
pub type StateStoreResult<T> = Result<T, StateStoreError>;

/// Persistence contract for registration records.
///
/// Each application owns exactly one record, stored under the file name
/// `<app_name>.conf`.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Writes a registration, replacing any record for the same application.
    ///
    /// Readers observe either the previous or the new record, never a
    /// partially written one.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Io`] when the record cannot be written.
    async fn write(&self, registration: &Registration) -> StateStoreResult<()>;

    /// Lists the file names of all stored records, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Io`] when the store cannot be listed.
    async fn list(&self) -> StateStoreResult<Vec<String>>;

    /// Reads and decodes one record by file name.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::InvalidFileName`] when the file name does
    /// not map to an application, [`StateStoreError::Parse`] when the record
    /// is malformed, or [`StateStoreError::Io`] when it cannot be read.
    async fn read(&self, file_name: &str) -> StateStoreResult<Registration>;
}

/// Errors returned by state store implementations.
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    /// The file name does not name a registration record.
    #[error("state file name '{0}' does not name an application record")]
    InvalidFileName(String),

    /// The record exists but could not be decoded.
    #[error("malformed state record '{file}': {reason}")]
    Parse {
        /// File name of the malformed record.
        file: String,
        /// Decoding failure.
        reason: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Filesystem failure.
    #[error("state store I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl StateStoreError {
    /// Wraps a decoding failure for the given file.
    pub fn parse(
        file: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            reason: Arc::new(err),
        }
    }

    /// Returns whether the error is local to a single record.
    ///
    /// Record-local errors are skipped by read-side scans.
    #[must_use]
    pub const fn is_record_local(&self) -> bool {
        matches!(self, Self::InvalidFileName(_) | Self::Parse { .. })
    }
}

impl From<std::io::Error> for StateStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

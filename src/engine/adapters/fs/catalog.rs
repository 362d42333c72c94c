//! Daemon definitions discovered from the framework's daemon directory.

use super::{open_ambient_dir, run_blocking};
use crate::engine::{
    domain::EngineId,
    ports::{DaemonCatalog, DaemonControlError, DaemonControlResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

/// Extension of daemon definition files.
const DEFINITION_EXTENSION: &str = "php";

/// Catalog backed by a directory holding one `<engine>.php` definition per
/// daemon the host framework can manage.
#[derive(Debug, Clone)]
pub struct DirDaemonCatalog {
    dir: Arc<Dir>,
}

impl DirDaemonCatalog {
    /// Opens the daemon definition directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> std::io::Result<Self> {
        Ok(Self::from_dir(open_ambient_dir(path)?))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

#[async_trait]
impl DaemonCatalog for DirDaemonCatalog {
    async fn is_defined(&self, engine_id: &EngineId) -> DaemonControlResult<bool> {
        let definition = format!("{engine_id}.{DEFINITION_EXTENSION}");
        let dir = Arc::clone(&self.dir);
        run_blocking(
            move || match dir.metadata(&definition) {
                Ok(metadata) => Ok(metadata.is_file()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(err) => Err(DaemonControlError::runtime(err)),
            },
            DaemonControlError::runtime,
        )
        .await
    }
}

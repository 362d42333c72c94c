//! Registration records stored as `<app>.conf` files in a state directory.

use super::{open_ambient_dir, run_blocking};
use crate::engine::{
    adapters::record::{
        app_name_from_file_name, decode_record, encode_record, is_state_file_name,
        state_file_name,
    },
    domain::Registration,
    ports::{StateStore, StateStoreError, StateStoreResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
#[cfg(unix)]
use cap_std::fs::{Permissions, PermissionsExt};
use cap_std::fs_utf8::Dir;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinError;
use tracing::{debug, warn};

/// Mode of record files: readable by everyone, writable by the owner.
#[cfg(unix)]
const RECORD_MODE: u32 = 0o644;

/// Distinguishes temporary files of writes issued by this process.
static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

/// State store over a pre-existing state directory.
///
/// Every write goes to its own dot-prefixed temporary file that is renamed
/// over the record, so readers never observe a partial record and the last
/// rename wins when writers race on the same application.
#[derive(Debug, Clone)]
pub struct DirStateStore {
    dir: Arc<Dir>,
}

impl DirStateStore {
    /// Opens the state directory at `path`.
    ///
    /// The directory is created by installation, not by this adapter.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Io`] when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> StateStoreResult<Self> {
        Ok(Self::from_dir(open_ambient_dir(path)?))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

fn temp_name_for(file_name: &str) -> String {
    let id = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);
    format!(".{file_name}.{}.{id}.tmp", std::process::id())
}

fn replace_record(dir: &Dir, file_name: &str, contents: &str) -> std::io::Result<()> {
    let temp_name = temp_name_for(file_name);
    let replaced = write_temp(dir, &temp_name, contents)
        .and_then(|()| dir.rename(&temp_name, dir, file_name));
    if replaced.is_err() {
        discard_temp(dir, &temp_name);
    }
    replaced
}

fn write_temp(dir: &Dir, temp_name: &str, contents: &str) -> std::io::Result<()> {
    let mut file = dir.create(temp_name)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    #[cfg(unix)]
    dir.set_permissions(temp_name, Permissions::from_mode(RECORD_MODE))?;
    Ok(())
}

fn discard_temp(dir: &Dir, temp_name: &str) {
    match dir.remove_file(temp_name) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(file = temp_name, error = %err, "could not remove temporary record"),
    }
}

fn list_records(dir: &Dir) -> StateStoreResult<Vec<String>> {
    let mut names = Vec::new();
    for listed in dir.entries()? {
        let entry = listed?;
        match entry.file_name() {
            Ok(name) if is_state_file_name(&name) => names.push(name),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "skipping state entry with non UTF-8 name"),
        }
    }
    Ok(names)
}

fn join_error(err: JoinError) -> StateStoreError {
    std::io::Error::other(err).into()
}

#[async_trait]
impl StateStore for DirStateStore {
    async fn write(&self, registration: &Registration) -> StateStoreResult<()> {
        let file_name = state_file_name(registration.app_name());
        let contents = encode_record(registration)?;

        let dir = Arc::clone(&self.dir);
        let target = file_name.clone();
        run_blocking(
            move || replace_record(&dir, &target, &contents).map_err(StateStoreError::from),
            join_error,
        )
        .await?;

        debug!(file = %file_name, "registration record written");
        Ok(())
    }

    async fn list(&self) -> StateStoreResult<Vec<String>> {
        let dir = Arc::clone(&self.dir);
        run_blocking(move || list_records(&dir), join_error).await
    }

    async fn read(&self, file_name: &str) -> StateStoreResult<Registration> {
        app_name_from_file_name(file_name)?;
        let dir = Arc::clone(&self.dir);
        let name = file_name.to_owned();
        let contents = run_blocking(
            move || dir.read_to_string(&name).map_err(StateStoreError::from),
            join_error,
        )
        .await?;
        decode_record(file_name, &contents)
    }
}

//! Directory-backed adapters using capability-based filesystem access.
//!
//! Each adapter holds a [`cap_std::fs_utf8::Dir`] handle opened once at
//! construction; all later file operations are confined to that directory
//! and run on tokio's blocking pool.

mod catalog;
mod state_store;

pub use catalog::DirDaemonCatalog;
pub use state_store::DirStateStore;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tokio::task::JoinError;

fn open_ambient_dir(path: &Utf8Path) -> std::io::Result<Dir> {
    Dir::open_ambient_dir(path, ambient_authority())
}

/// Runs blocking filesystem work off the async executor, mapping join
/// failures into the caller's error type.
async fn run_blocking<F, T, E, M>(f: F, map_join_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_join_err)?
}

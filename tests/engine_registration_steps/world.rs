//! Shared world state for engine registration BDD scenarios.

use std::sync::Arc;

use camino::Utf8PathBuf;
use php_engines::bootstrap::EngineServices;
use php_engines::config::EnginesConfig;
use php_engines::engine::{
    adapters::memory::InMemoryDaemonController,
    domain::{EngineId, Registration, SupportedEngine},
    services::{EngineRegistrationServiceError, RegisterEnginesRequest},
};
use rstest::fixture;
use tempfile::TempDir;

/// Scenario world for engine registration behaviour tests.
pub struct EngineWorld {
    /// Scratch root holding the state and daemon directories.
    _scratch: TempDir,
    /// State directory inside the scratch root.
    pub state_dir: Utf8PathBuf,
    /// Daemon controller standing in for the host framework.
    pub daemons: Arc<InMemoryDaemonController>,
    /// Services under test.
    pub services: EngineServices<InMemoryDaemonController>,
    /// Result of the last registration attempt.
    pub last_register_result: Option<Result<Registration, EngineRegistrationServiceError>>,
}

impl EngineWorld {
    /// Creates a world over fresh scratch directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the scratch directories or services cannot be
    /// created.
    pub fn new() -> Result<Self, eyre::Report> {
        let root = tempfile::tempdir()?;
        let root_path = Utf8PathBuf::try_from(root.path().to_path_buf())?;
        let state_dir = root_path.join("state");
        let daemon_dir = root_path.join("daemon");
        std::fs::create_dir(&state_dir)?;
        std::fs::create_dir(&daemon_dir)?;

        let config = EnginesConfig {
            state_dir: state_dir.clone(),
            daemon_dir,
            activation_timeout_secs: 5,
            engines: vec![
                SupportedEngine::new(EngineId::new("fpm56")?, "PHP 5.6", 9056),
                SupportedEngine::new(EngineId::new("fpm70")?, "PHP 7.0", 9070),
            ],
        };
        let daemons = Arc::new(InMemoryDaemonController::new());
        let services = EngineServices::open(&config, Arc::clone(&daemons))?;

        Ok(Self {
            _scratch: root,
            state_dir,
            daemons,
            services,
            last_register_result: None,
        })
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> EngineWorld {
    EngineWorld::new().unwrap_or_else(|err| panic!("scenario world should build: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a single-binding [`RegisterEnginesRequest`].
pub fn build_request(
    app: &str,
    description: &str,
    key: &str,
    engine: &str,
) -> RegisterEnginesRequest {
    RegisterEnginesRequest::new(app, description).with_engine(key, engine)
}

/// Parses an engine identifier from step text.
///
/// # Errors
///
/// Returns an error when the identifier is blank.
pub fn engine_id(raw: &str) -> Result<EngineId, eyre::Report> {
    Ok(EngineId::new(raw)?)
}

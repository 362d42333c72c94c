//! Runtime configuration for the engine services.
//!
//! Configuration is explicit: the state directory, the daemon definition
//! directory, the activation timeout, and the supported-engine table are all
//! injected rather than hard-coded, so tests can point the services at
//! scratch directories and fake engine sets.
//!
//! A JSON configuration file has the shape:
//!
//! ```json
//! {
//!   "state_dir": "/var/clearos/php_engines/state",
//!   "daemon_dir": "/var/clearos/base/daemon",
//!   "activation_timeout_secs": 30,
//!   "engines": [
//!     { "id": "rh-php70-php-fpm", "display_name": "PHP 7.0", "port": 9070 }
//!   ]
//! }
//! ```
//!
//! Every field is optional and falls back to [`EnginesConfig::default`].

use crate::engine::domain::{EngineDomainError, EngineRegistry, SupportedEngine};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`EnginesConfig::state_dir`].
pub const STATE_DIR_ENV: &str = "PHP_ENGINES_STATE_DIR";
/// Environment variable overriding [`EnginesConfig::daemon_dir`].
pub const DAEMON_DIR_ENV: &str = "PHP_ENGINES_DAEMON_DIR";
/// Environment variable overriding [`EnginesConfig::activation_timeout_secs`].
pub const ACTIVATION_TIMEOUT_ENV: &str = "PHP_ENGINES_ACTIVATION_TIMEOUT_SECS";

const DEFAULT_STATE_DIR: &str = "/var/clearos/php_engines/state";
const DEFAULT_DAEMON_DIR: &str = "/var/clearos/base/daemon";
const DEFAULT_ACTIVATION_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        reason: Arc<std::io::Error>,
    },

    /// The configuration file is not valid JSON for [`EnginesConfig`].
    #[error("failed to parse configuration {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        reason: Arc<serde_json::Error>,
    },

    /// A setting holds an unusable value.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Setting or environment variable name.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The engine table is inconsistent.
    #[error(transparent)]
    Registry(#[from] EngineDomainError),
}

/// Settings for the engine services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnginesConfig {
    /// Directory holding one `<app>.conf` record per registered application.
    pub state_dir: Utf8PathBuf,
    /// Directory holding one `<engine>.php` definition per known daemon.
    pub daemon_dir: Utf8PathBuf,
    /// Seconds allowed for each daemon control call during activation.
    pub activation_timeout_secs: u64,
    /// Supported engines.
    pub engines: Vec<SupportedEngine>,
}

impl Default for EnginesConfig {
    fn default() -> Self {
        Self {
            state_dir: Utf8PathBuf::from(DEFAULT_STATE_DIR),
            daemon_dir: Utf8PathBuf::from(DEFAULT_DAEMON_DIR),
            activation_timeout_secs: DEFAULT_ACTIVATION_TIMEOUT_SECS,
            engines: EngineRegistry::standard().iter().cloned().collect(),
        }
    }
}

impl EnginesConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not valid configuration, or
    /// [`ConfigError::InvalidValue`] when a setting is unusable.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |err: std::io::Error| ConfigError::Read {
            path: path.to_path_buf(),
            reason: Arc::new(err),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(file_name).map_err(read_error)?;

        let config: Self = serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: Arc::new(err),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an override is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// Unset or blank values leave the current setting unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an override is unusable.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(state_dir) = present(STATE_DIR_ENV) {
            self.state_dir = Utf8PathBuf::from(state_dir.trim());
        }
        if let Some(daemon_dir) = present(DAEMON_DIR_ENV) {
            self.daemon_dir = Utf8PathBuf::from(daemon_dir.trim());
        }
        if let Some(timeout) = present(ACTIVATION_TIMEOUT_ENV) {
            self.activation_timeout_secs =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ACTIVATION_TIMEOUT_ENV.to_owned(),
                        value: timeout.clone(),
                    })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks settings that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero activation timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "activation_timeout_secs".to_owned(),
                value: "0".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the time allowed for each daemon control call.
    #[must_use]
    pub const fn activation_timeout(&self) -> Duration {
        Duration::from_secs(self.activation_timeout_secs)
    }

    /// Builds the supported-engine registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] when an engine is listed twice.
    pub fn registry(&self) -> Result<EngineRegistry, ConfigError> {
        Ok(EngineRegistry::new(self.engines.iter().cloned())?)
    }
}

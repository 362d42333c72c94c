//! Supported engine metadata and the immutable engine registry.

use super::{EngineDomainError, EngineId};
use serde::{Deserialize, Serialize};

/// A PHP engine the server knows how to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedEngine {
    id: EngineId,
    display_name: String,
    #[serde(default)]
    port: u16,
}

impl SupportedEngine {
    /// Creates engine metadata. A `port` of `0` means the engine does not
    /// listen on a dedicated port (it runs inside the web server).
    #[must_use]
    pub fn new(id: EngineId, display_name: impl Into<String>, port: u16) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            port,
        }
    }

    /// Returns the engine identifier.
    #[must_use]
    pub const fn id(&self) -> &EngineId {
        &self.id
    }

    /// Returns the human-readable engine name (e.g. `PHP 7.0`).
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the raw port value, `0` when the engine has none.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the listening port, if the engine has one.
    #[must_use]
    pub const fn listen_port(&self) -> Option<u16> {
        if self.port == 0 { None } else { Some(self.port) }
    }
}

/// Immutable table of supported engines.
///
/// Iteration follows the order in which the table was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineRegistry {
    engines: Vec<SupportedEngine>,
}

impl EngineRegistry {
    /// Builds a registry from engine metadata, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::DuplicateEngine`] when two entries share
    /// an identifier.
    pub fn new(
        engines: impl IntoIterator<Item = SupportedEngine>,
    ) -> Result<Self, EngineDomainError> {
        let mut table: Vec<SupportedEngine> = Vec::new();
        for engine in engines {
            if table.iter().any(|known| known.id() == engine.id()) {
                return Err(EngineDomainError::DuplicateEngine(engine.id.into()));
            }
            table.push(engine);
        }
        Ok(Self { engines: table })
    }

    /// Returns the stock engine table shipped with the server.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            engines: standard_engines(),
        }
    }

    /// Returns metadata for an engine, if it is supported.
    #[must_use]
    pub fn get(&self, id: &EngineId) -> Option<&SupportedEngine> {
        self.engines.iter().find(|engine| engine.id() == id)
    }

    /// Returns whether the identifier names a supported engine.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.engines.iter().any(|engine| engine.id().as_str() == id)
    }

    /// Checks a raw engine identifier against the registry.
    ///
    /// Empty input means "not specified" and passes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::UnsupportedEngine`] when the identifier
    /// is not in the registry.
    pub fn validate(&self, raw_id: &str) -> Result<(), EngineDomainError> {
        let trimmed = raw_id.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return Ok(());
        }
        Err(EngineDomainError::UnsupportedEngine(raw_id.to_owned()))
    }

    /// Iterates over supported engines in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SupportedEngine> {
        self.engines.iter()
    }

    /// Returns the number of supported engines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns whether the registry has no engines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

/// Engine table used when no other registry is configured.
fn standard_engines() -> Vec<SupportedEngine> {
    [
        ("httpd", "PHP 5.4", 0),
        ("rh-php56-php-fpm", "PHP 5.6", 9056),
        ("rh-php70-php-fpm", "PHP 7.0", 9070),
    ]
    .into_iter()
    .map(|(id, display_name, port)| {
        SupportedEngine::new(EngineId::from_trusted(id), display_name, port)
    })
    .collect()
}

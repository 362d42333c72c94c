//! Identifier types for the engine domain.

use super::EngineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a PHP engine daemon (e.g. `rh-php70-php-fpm`).
///
/// Engine identifiers double as daemon names, so they are kept verbatim
/// apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EngineId(String);

impl EngineId {
    /// Creates an engine identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::EmptyEngineId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EngineDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(EngineDomainError::EmptyEngineId);
        }
        Ok(Self(trimmed))
    }

    /// Wraps an identifier known to be trimmed and non-empty.
    pub(super) fn from_trusted(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EngineId {
    type Error = EngineDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EngineId> for String {
    fn from(value: EngineId) -> Self {
        value.0
    }
}

impl AsRef<str> for EngineId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

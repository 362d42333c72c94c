//! Error types for engine domain validation.

use thiserror::Error;

/// Errors returned while constructing engine domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineDomainError {
    /// The application name is empty after trimming.
    #[error("application name must not be empty")]
    EmptyAppName,

    /// The application name cannot be used as a state file name.
    #[error("application name '{0}' is not a safe file name")]
    InvalidAppName(String),

    /// The application name exceeds the 100-character limit.
    #[error("application name exceeds 100 character limit: {0}")]
    AppNameTooLong(String),

    /// The engine identifier is empty after trimming.
    #[error("engine identifier must not be empty")]
    EmptyEngineId,

    /// The same engine identifier appears twice in a registry table.
    #[error("engine '{0}' is declared more than once")]
    DuplicateEngine(String),

    /// The engine identifier is not present in the engine registry.
    #[error("unsupported PHP engine: {0}")]
    UnsupportedEngine(String),
}

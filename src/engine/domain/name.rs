//! Validated application name type.

use super::EngineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an application name.
const MAX_NAME_LENGTH: usize = 100;

/// Validated name of an application that registers PHP engines.
///
/// The name becomes the stem of the application's state file, so it must be
/// usable as a single path component: no separators, no NUL bytes, and no
/// leading dot (dot-prefixed names are reserved for temporary files).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Creates a validated application name.
    ///
    /// The input is trimmed but otherwise kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::EmptyAppName`] when the value is empty
    /// after trimming, [`EngineDomainError::AppNameTooLong`] when it exceeds
    /// 100 characters, or [`EngineDomainError::InvalidAppName`] when it is
    /// not a safe file name.
    pub fn new(value: impl Into<String>) -> Result<Self, EngineDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EngineDomainError::EmptyAppName);
        }

        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(EngineDomainError::AppNameTooLong(raw));
        }

        let has_forbidden = trimmed
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control());

        if has_forbidden || trimmed.starts_with('.') {
            return Err(EngineDomainError::InvalidAppName(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the application name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AppName {
    type Error = EngineDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppName> for String {
    fn from(value: AppName) -> Self {
        value.0
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

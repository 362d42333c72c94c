//! On-disk encoding of registration records.
//!
//! A record is a single JSON line:
//!
//! ```text
//! {"app_description":"Webmail App","engines":{"default":"rh-php70-php-fpm"}}
//! ```
//!
//! The application name is not part of the payload; it is the file name
//! stem.

use crate::engine::{
    domain::{AppName, EngineBindings, EngineId, Registration},
    ports::{StateStoreError, StateStoreResult},
};
use serde::{Deserialize, Deserializer, Serialize};

/// File name suffix of registration records.
pub const STATE_FILE_SUFFIX: &str = ".conf";

/// Returns the record file name for an application.
#[must_use]
pub fn state_file_name(app_name: &AppName) -> String {
    format!("{app_name}{STATE_FILE_SUFFIX}")
}

#[derive(Serialize)]
struct RecordPayload<'a> {
    app_description: &'a str,
    engines: &'a EngineBindings,
}

#[derive(Deserialize)]
struct StoredRecord {
    app_description: String,
    #[serde(deserialize_with = "deserialize_bindings")]
    engines: EngineBindings,
}

/// Bindings written by older tooling may be a JSON list when the keys were
/// positional; list indices become the keys.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBindings {
    Keyed(EngineBindings),
    Positional(Vec<EngineId>),
}

fn deserialize_bindings<'de, D>(deserializer: D) -> Result<EngineBindings, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredBindings::deserialize(deserializer)? {
        StoredBindings::Keyed(bindings) => bindings,
        StoredBindings::Positional(engines) => engines
            .into_iter()
            .enumerate()
            .map(|(index, engine_id)| (index.to_string(), engine_id))
            .collect(),
    })
}

/// Returns whether a directory entry looks like a registration record.
pub(super) fn is_state_file_name(file_name: &str) -> bool {
    file_name.ends_with(STATE_FILE_SUFFIX)
}

/// Recovers the application name from a record file name.
pub(super) fn app_name_from_file_name(file_name: &str) -> StateStoreResult<AppName> {
    let invalid = || StateStoreError::InvalidFileName(file_name.to_owned());
    let stem = file_name.strip_suffix(STATE_FILE_SUFFIX).ok_or_else(invalid)?;
    let app_name = AppName::new(stem).map_err(|_| invalid())?;
    if app_name.as_str() != stem {
        return Err(invalid());
    }
    Ok(app_name)
}

/// Encodes a registration as a newline-terminated JSON line.
pub(super) fn encode_record(registration: &Registration) -> StateStoreResult<String> {
    let payload = RecordPayload {
        app_description: registration.app_description(),
        engines: registration.engines(),
    };
    let line = serde_json::to_string(&payload).map_err(|err| {
        StateStoreError::parse(state_file_name(registration.app_name()), err)
    })?;
    Ok(format!("{line}\n"))
}

/// Decodes a record; only the first line of the contents is significant.
pub(super) fn decode_record(file_name: &str, contents: &str) -> StateStoreResult<Registration> {
    let app_name = app_name_from_file_name(file_name)?;
    let first_line = contents.lines().next().unwrap_or_default();
    let record: StoredRecord =
        serde_json::from_str(first_line).map_err(|err| StateStoreError::parse(file_name, err))?;
    Ok(Registration::new(
        app_name,
        record.app_description,
        record.engines,
    ))
}

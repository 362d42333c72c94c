//! Adapter implementations for engine registration ports.

pub mod fs;
pub mod memory;

mod record;

pub use record::{STATE_FILE_SUFFIX, state_file_name};

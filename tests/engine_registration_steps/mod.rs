//! Step definitions for engine registration scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

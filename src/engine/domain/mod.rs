//! Domain model for PHP engine registration and deployed-state reporting.
//!
//! The engine domain models the supported-engine registry, per-application
//! registrations, and the read-side projections derived from them. All
//! infrastructure concerns are kept outside the domain boundary.

mod deployed;
mod error;
mod ids;
mod name;
mod registration;
mod service_info;
mod supported;

pub use deployed::{DeployedState, DeployedStateEntry};
pub use error::EngineDomainError;
pub use ids::EngineId;
pub use name::AppName;
pub use registration::{EngineBindings, Registration};
pub use service_info::EngineServiceInfo;
pub use supported::{EngineRegistry, SupportedEngine};

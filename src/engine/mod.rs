//! PHP engine registration and deployed-state reporting.
//!
//! Applications declare which PHP engines they depend on; the declarations
//! are persisted as one JSON record per application and the engines they
//! name are started on demand. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

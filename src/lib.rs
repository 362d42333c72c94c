//! PHP engine registration and deployed-state reporting.
//!
//! This crate lets an administrative front end record which PHP engines
//! (for example PHP-FPM pools) each application depends on, keep those
//! engines running, and report which applications use which engine.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure registration logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for state storage and daemon control
//! - **Adapters**: Concrete implementations of ports (directories, in-memory)
//!
//! # Modules
//!
//! - [`engine`]: Engine registry, registrations, and deployed-state services
//! - [`config`]: Paths, timeouts, and the supported-engine table
//! - [`bootstrap`]: Wiring of the services over the configured directories

pub mod bootstrap;
pub mod config;
pub mod engine;

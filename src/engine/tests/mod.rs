//! Unit tests for the engine module.

mod domain_tests;
mod inventory_tests;

use crate::engine::domain::{EngineId, EngineRegistry, SupportedEngine};

/// Builds an engine identifier for tests.
fn engine(id: &str) -> EngineId {
    EngineId::new(id).expect("valid engine id")
}

/// Two-engine registry used across service tests.
fn fpm_registry() -> EngineRegistry {
    EngineRegistry::new([
        SupportedEngine::new(engine("fpm56"), "PHP 5.6", 9056),
        SupportedEngine::new(engine("fpm70"), "PHP 7.0", 9070),
    ])
    .expect("registry without duplicates")
}

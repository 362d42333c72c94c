//! Then steps for engine registration BDD scenarios.

use super::world::{EngineWorld, engine_id, run_async};
use php_engines::engine::{
    domain::EngineDomainError, ports::DaemonController, services::EngineRegistrationServiceError,
};
use rstest_bdd_macros::then;

#[then(r#"the engine "{engine}" is running"#)]
fn engine_is_running(world: &EngineWorld, engine: String) -> Result<(), eyre::Report> {
    let id = engine_id(&engine)?;
    let running = run_async(world.daemons.is_running(&id))
        .map_err(|err| eyre::eyre!("is_running failed: {err}"))?;
    if !running {
        return Err(eyre::eyre!("expected engine '{engine}' to be running"));
    }
    Ok(())
}

#[then(r#"the deployed state for "{engine}" lists "{app}" under key "{key}""#)]
fn deployed_state_lists(
    world: &EngineWorld,
    engine: String,
    app: String,
    key: String,
) -> Result<(), eyre::Report> {
    let id = engine_id(&engine)?;
    let entries = run_async(world.services.deployed_state.deployed_state_for(&id))
        .map_err(|err| eyre::eyre!("deployed_state_for failed: {err}"))?;
    let found = entries
        .iter()
        .any(|entry| entry.app_name().as_str() == app && entry.engine_key() == key);
    if !found {
        return Err(eyre::eyre!(
            "expected '{app}' under key '{key}' for '{engine}', found {entries:?}"
        ));
    }
    Ok(())
}

#[then(r#"the deployed state for "{engine}" is empty"#)]
fn deployed_state_empty(world: &EngineWorld, engine: String) -> Result<(), eyre::Report> {
    let id = engine_id(&engine)?;
    let entries = run_async(world.services.deployed_state.deployed_state_for(&id))
        .map_err(|err| eyre::eyre!("deployed_state_for failed: {err}"))?;
    if !entries.is_empty() {
        return Err(eyre::eyre!("expected no entries for '{engine}', found {entries:?}"));
    }
    Ok(())
}

#[then("the deployed state lists {count:usize} entries")]
fn deployed_state_count(world: &EngineWorld, count: usize) -> Result<(), eyre::Report> {
    let state = run_async(world.services.deployed_state.deployed_state())
        .map_err(|err| eyre::eyre!("deployed_state failed: {err}"))?;
    if state.entry_count() != count {
        return Err(eyre::eyre!(
            "expected {count} entries, found {}",
            state.entry_count()
        ));
    }
    Ok(())
}

#[then("registration fails with an invalid application name error")]
fn registration_fails_with_invalid_name(world: &EngineWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_register_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    if !matches!(
        result,
        Err(EngineRegistrationServiceError::Domain(
            EngineDomainError::InvalidAppName(_)
        ))
    ) {
        return Err(eyre::eyre!("expected invalid app name error, got {result:?}"));
    }
    Ok(())
}

//! Given steps for engine registration BDD scenarios.

use super::world::{EngineWorld, build_request, engine_id, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the PHP engine "{engine}" is installed"#)]
fn engine_installed(world: &mut EngineWorld, engine: String) -> Result<(), eyre::Report> {
    world
        .daemons
        .install(engine_id(&engine)?)
        .wrap_err("install engine for scenario")?;
    Ok(())
}

#[given(
    r#"the application "{app}" described as "{description}" has registered engine "{engine}" under key "{key}""#
)]
fn application_registered(
    world: &mut EngineWorld,
    app: String,
    description: String,
    engine: String,
    key: String,
) -> Result<(), eyre::Report> {
    let request = build_request(&app, &description, &key, &engine);
    run_async(world.services.registration.register(request))
        .wrap_err("register application for scenario")?;
    Ok(())
}

#[given(r#"a corrupt state record named "{file}""#)]
fn corrupt_record(world: &mut EngineWorld, file: String) -> Result<(), eyre::Report> {
    std::fs::write(world.state_dir.join(file), "{\"app_description\":")
        .wrap_err("write corrupt record")?;
    Ok(())
}

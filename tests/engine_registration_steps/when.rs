//! When steps for engine registration BDD scenarios.

use super::world::{EngineWorld, build_request, run_async};
use rstest_bdd_macros::when;

#[when(
    r#"the application "{app}" described as "{description}" registers engine "{engine}" under key "{key}""#
)]
fn application_registers(
    world: &mut EngineWorld,
    app: String,
    description: String,
    engine: String,
    key: String,
) {
    let request = build_request(&app, &description, &key, &engine);
    world.last_register_result = Some(run_async(world.services.registration.register(request)));
}

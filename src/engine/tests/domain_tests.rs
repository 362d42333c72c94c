//! Unit tests for engine domain types.

use super::{engine, fpm_registry};
use crate::engine::domain::{
    AppName, DeployedState, EngineBindings, EngineDomainError, EngineId, EngineRegistry,
    Registration, SupportedEngine,
};
use rstest::rstest;

fn registration(app: &str, bindings: &[(&str, &str)]) -> Registration {
    Registration::new(
        AppName::new(app).expect("valid app name"),
        format!("{app} description"),
        bindings
            .iter()
            .map(|(key, id)| ((*key).to_owned(), engine(id)))
            .collect(),
    )
}

// ── AppName validation ─────────────────────────────────────────────

#[rstest]
#[case("webmail")]
#[case("web-mail")]
#[case("web_mail.v2")]
#[case("Wiki")]
fn valid_app_names_are_accepted(#[case] input: &str) {
    let name = AppName::new(input).expect("name should be valid");
    assert_eq!(name.as_str(), input);
}

#[rstest]
fn app_name_is_trimmed() {
    let name = AppName::new("  webmail \n").expect("should accept after trim");
    assert_eq!(name.as_str(), "webmail");
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_app_name_is_rejected(#[case] input: &str) {
    assert!(matches!(
        AppName::new(input),
        Err(EngineDomainError::EmptyAppName)
    ));
}

#[rstest]
#[case("../etc/passwd")]
#[case("apps/webmail")]
#[case("apps\\webmail")]
#[case(".")]
#[case("..")]
#[case(".hidden")]
#[case("web\0mail")]
fn unsafe_app_names_are_rejected(#[case] input: &str) {
    assert!(matches!(
        AppName::new(input),
        Err(EngineDomainError::InvalidAppName(_))
    ));
}

#[rstest]
#[case(100, true)]
#[case(101, false)]
fn app_name_length_boundary(#[case] length: usize, #[case] expected_ok: bool) {
    let result = AppName::new("a".repeat(length));
    if expected_ok {
        assert!(result.is_ok(), "expected length {length} to be accepted");
    } else {
        assert!(matches!(result, Err(EngineDomainError::AppNameTooLong(_))));
    }
}

// ── EngineId ───────────────────────────────────────────────────────

#[rstest]
fn engine_id_keeps_inner_punctuation() {
    let id = EngineId::new(" rh-php70-php-fpm ").expect("valid engine id");
    assert_eq!(id.as_str(), "rh-php70-php-fpm");
}

#[rstest]
fn blank_engine_id_is_rejected() {
    assert!(matches!(
        EngineId::new("  "),
        Err(EngineDomainError::EmptyEngineId)
    ));
}

// ── EngineRegistry ─────────────────────────────────────────────────

#[rstest]
fn standard_registry_lists_stock_engines() {
    let registry = EngineRegistry::standard();

    let table: Vec<(&str, &str, u16)> = registry
        .iter()
        .map(|e| (e.id().as_str(), e.display_name(), e.port()))
        .collect();

    assert_eq!(
        table,
        vec![
            ("httpd", "PHP 5.4", 0),
            ("rh-php56-php-fpm", "PHP 5.6", 9056),
            ("rh-php70-php-fpm", "PHP 7.0", 9070),
        ]
    );
}

#[rstest]
fn zero_port_means_no_listen_port() {
    let registry = EngineRegistry::standard();
    let httpd = registry.get(&engine("httpd")).expect("httpd is stock");
    let fpm70 = registry
        .get(&engine("rh-php70-php-fpm"))
        .expect("fpm70 is stock");

    assert_eq!(httpd.listen_port(), None);
    assert_eq!(fpm70.listen_port(), Some(9070));
}

#[rstest]
#[case("")]
#[case("  ")]
#[case("fpm56")]
#[case("fpm70")]
fn validate_accepts_blank_and_supported(#[case] input: &str) {
    assert_eq!(fpm_registry().validate(input), Ok(()));
}

#[rstest]
#[case("unknown-id")]
#[case("FPM70")]
fn validate_rejects_unsupported(#[case] input: &str) {
    assert_eq!(
        fpm_registry().validate(input),
        Err(EngineDomainError::UnsupportedEngine(input.to_owned()))
    );
}

#[rstest]
fn registry_rejects_duplicate_ids() {
    let result = EngineRegistry::new([
        SupportedEngine::new(engine("fpm70"), "PHP 7.0", 9070),
        SupportedEngine::new(engine("fpm70"), "PHP 7.0 again", 9071),
    ]);

    assert_eq!(
        result,
        Err(EngineDomainError::DuplicateEngine("fpm70".to_owned()))
    );
}

// ── Registration and DeployedState ─────────────────────────────────

#[rstest]
fn distinct_engines_collapse_shared_bindings() {
    let reg = registration(
        "suite",
        &[("mail", "fpm70"), ("wiki", "fpm70"), ("legacy", "fpm56")],
    );

    let distinct: Vec<&str> = reg.distinct_engines().into_iter().map(EngineId::as_str).collect();

    assert_eq!(distinct, vec!["fpm56", "fpm70"]);
}

#[rstest]
fn deployed_state_groups_every_binding_by_engine() {
    let registrations = [
        registration("webmail", &[("default", "fpm70")]),
        registration("suite", &[("mail", "fpm70"), ("legacy", "fpm56")]),
    ];

    let state = DeployedState::from_registrations(&registrations);

    assert_eq!(state.entry_count(), 3);
    let fpm70: Vec<(&str, &str)> = state
        .entries_for(&engine("fpm70"))
        .iter()
        .map(|e| (e.app_name().as_str(), e.engine_key()))
        .collect();
    assert_eq!(fpm70, vec![("suite", "mail"), ("webmail", "default")]);
    for (engine_id, entries) in state.iter() {
        assert!(entries.iter().all(|e| e.engine_id() == engine_id));
    }
}

#[rstest]
fn unused_engine_has_no_entries() {
    let state =
        DeployedState::from_registrations(&[registration("webmail", &[("default", "fpm70")])]);

    assert!(state.entries_for(&engine("fpm56")).is_empty());
    assert!(state.take_entries_for(&engine("fpm56")).is_empty());
}

#[rstest]
fn registration_without_bindings_contributes_nothing() {
    let empty = Registration::new(
        AppName::new("idle").expect("valid app name"),
        "Idle",
        EngineBindings::new(),
    );

    let state = DeployedState::from_registrations([&empty]);

    assert!(state.is_empty());
}

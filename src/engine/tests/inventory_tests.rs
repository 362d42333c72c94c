//! Unit tests for engine inventory reporting.

use std::sync::Arc;

use super::engine;
use crate::engine::{
    adapters::memory::{InMemoryDaemonCatalog, InMemoryDaemonController},
    domain::{EngineRegistry, EngineServiceInfo, SupportedEngine},
    services::EngineInventoryService,
};
use rstest::{fixture, rstest};

type TestService = EngineInventoryService<InMemoryDaemonCatalog, InMemoryDaemonController>;

#[fixture]
fn daemons() -> Arc<InMemoryDaemonController> {
    Arc::new(InMemoryDaemonController::new())
}

fn service_with(
    catalog: InMemoryDaemonCatalog,
    daemons: Arc<InMemoryDaemonController>,
) -> TestService {
    EngineInventoryService::new(
        Arc::new(catalog),
        daemons,
        Arc::new(EngineRegistry::standard()),
    )
}

#[rstest]
fn engines_and_ports_mirror_the_registry(daemons: Arc<InMemoryDaemonController>) {
    let service = service_with(InMemoryDaemonCatalog::default(), daemons);

    let engines = service.engines();
    let ports = service.ports();

    assert_eq!(engines.get(&engine("rh-php56-php-fpm")).map(String::as_str), Some("PHP 5.6"));
    assert_eq!(ports.get(&engine("httpd")), Some(&0));
    assert_eq!(ports.get(&engine("rh-php70-php-fpm")), Some(&9070));
    assert_eq!(engines.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn available_engines_require_a_definition(daemons: Arc<InMemoryDaemonController>) {
    let catalog = InMemoryDaemonCatalog::with_defined([
        engine("rh-php70-php-fpm"),
        engine("httpd"),
        engine("nginx"),
    ]);
    let service = service_with(catalog, daemons);

    let available = service
        .available_engines()
        .await
        .expect("catalog query should succeed");

    assert_eq!(available, vec![engine("httpd"), engine("rh-php70-php-fpm")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn available_engines_follow_the_configured_table_order(
    daemons: Arc<InMemoryDaemonController>,
) {
    let registry = EngineRegistry::new([
        SupportedEngine::new(engine("rh-php70-php-fpm"), "PHP 7.0", 9070),
        SupportedEngine::new(engine("httpd"), "PHP 5.4", 0),
        SupportedEngine::new(engine("rh-php56-php-fpm"), "PHP 5.6", 9056),
    ])
    .expect("registry without duplicates");
    let catalog = InMemoryDaemonCatalog::with_defined([
        engine("httpd"),
        engine("rh-php56-php-fpm"),
        engine("rh-php70-php-fpm"),
    ]);
    let service = EngineInventoryService::new(Arc::new(catalog), daemons, Arc::new(registry));

    let available = service
        .available_engines()
        .await
        .expect("catalog query should succeed");

    assert_eq!(
        available,
        vec![
            engine("rh-php70-php-fpm"),
            engine("httpd"),
            engine("rh-php56-php-fpm"),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn services_info_reports_installed_engines_only(daemons: Arc<InMemoryDaemonController>) {
    let fpm70 = engine("rh-php70-php-fpm");
    daemons
        .install_running(fpm70.clone())
        .expect("install fpm70");
    daemons
        .describe(&fpm70, true, false, "/app/php_engines")
        .expect("describe fpm70");
    let catalog = InMemoryDaemonCatalog::with_defined([engine("httpd"), fpm70.clone()]);
    let service = service_with(catalog, daemons);

    let report = service
        .services_info()
        .await
        .expect("inventory should succeed");

    assert_eq!(
        report,
        vec![EngineServiceInfo {
            engine_id: fpm70,
            description: "PHP 7.0".to_owned(),
            running: true,
            boot_enabled: true,
            multiservice: false,
            url: "/app/php_engines".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn installed_engine_without_definition_is_not_reported(
    daemons: Arc<InMemoryDaemonController>,
) {
    daemons
        .install(engine("rh-php56-php-fpm"))
        .expect("install fpm56");
    let service = service_with(InMemoryDaemonCatalog::default(), daemons);

    let report = service
        .services_info()
        .await
        .expect("inventory should succeed");

    assert!(report.is_empty());
}

//! Tests for registry builders

use prometheus_background_tasks::builders::build_registry;
use prometheus_background_tasks::config::RegistryConfig;
use prometheus_background_tasks::core::{TaskError, TaskUnit};
use prometheus_background_tasks::runtime::TokioSpawner;

#[tokio::test]
async fn test_build_registry_from_config() {
    let cfg = RegistryConfig {
        max_concurrent_tasks: 2,
        gc_resolution_secs: 30,
        retention_limit_secs: 60,
    };

    let registry = build_registry::<u64>(&cfg, TokioSpawner::current()).expect("valid config");
    assert_eq!(registry.gate().capacity(), Some(2));
    assert_eq!(registry.limits().retention.as_secs(), 60);
    assert_eq!(registry.limits().gc_resolution.as_secs(), 30);

    // The built registry is immediately usable.
    registry.submit("probe", TaskUnit::from_future(async { Ok(11) }));
    let value = loop {
        match registry.retrieve("probe", true) {
            Err(TaskError::NotReady(_)) => tokio::task::yield_now().await,
            other => break other.expect("probe completes"),
        }
    };
    assert_eq!(value, 11);
}

#[tokio::test]
async fn test_build_registry_rejects_invalid_config() {
    let cfg = RegistryConfig {
        gc_resolution_secs: 0,
        ..RegistryConfig::default()
    };

    match build_registry::<u64>(&cfg, TokioSpawner::current()) {
        Err(TaskError::InvalidConfig(msg)) => {
            assert!(msg.contains("gc_resolution_secs"), "got: {msg}");
        }
        Ok(_) => panic!("expected invalid config to be rejected"),
        Err(other) => panic!("expected InvalidConfig, got {other:?}"),
    }
}

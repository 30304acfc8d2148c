//! Tests for configuration validation and loading

use prometheus_background_tasks::config::RegistryConfig;

#[test]
fn test_defaults_match_deployment_defaults() {
    let cfg = RegistryConfig::default();
    assert_eq!(cfg.max_concurrent_tasks, 0);
    assert_eq!(cfg.gc_resolution_secs, 30);
    assert_eq!(cfg.retention_limit_secs, 6 * 60 * 60);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_resolution_rejected() {
    let cfg = RegistryConfig {
        gc_resolution_secs: 0,
        ..RegistryConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_unlimited_concurrency_is_valid() {
    let cfg = RegistryConfig {
        max_concurrent_tasks: 0,
        ..RegistryConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_retention_is_valid() {
    // Immediate eviction of terminal entries is a legitimate setting.
    let cfg = RegistryConfig {
        retention_limit_secs: 0,
        ..RegistryConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_from_json() {
    let json = r#"{
        "max_concurrent_tasks": 16,
        "gc_resolution_secs": 5,
        "retention_limit_secs": 120
    }"#;

    let cfg = RegistryConfig::from_json_str(json).expect("valid config");
    assert_eq!(cfg.max_concurrent_tasks, 16);
    assert_eq!(cfg.gc_resolution_secs, 5);
    assert_eq!(cfg.retention_limit_secs, 120);
}

#[test]
fn test_from_json_applies_defaults() {
    let cfg = RegistryConfig::from_json_str("{}").expect("empty config is valid");
    assert_eq!(cfg.max_concurrent_tasks, 0);
    assert_eq!(cfg.gc_resolution_secs, 30);
    assert_eq!(cfg.retention_limit_secs, 21_600);
}

#[test]
fn test_from_json_rejects_invalid_values() {
    assert!(RegistryConfig::from_json_str(r#"{"gc_resolution_secs": 0}"#).is_err());
    assert!(RegistryConfig::from_json_str("not json").is_err());
}

#[test]
fn test_from_env_reads_and_defaults() {
    std::env::set_var("BACKGROUND_TASK_LIMIT", "4");
    std::env::set_var("BACKGROUND_TASK_GARBAGE_RESOLUTION", "10");
    std::env::remove_var("BACKGROUND_TASK_PERSISTENCE_LIMIT");

    let cfg = RegistryConfig::from_env().expect("env config is valid");
    assert_eq!(cfg.max_concurrent_tasks, 4);
    assert_eq!(cfg.gc_resolution_secs, 10);
    assert_eq!(cfg.retention_limit_secs, 21_600);

    std::env::set_var("BACKGROUND_TASK_LIMIT", "not-a-number");
    assert!(RegistryConfig::from_env().is_err());

    std::env::remove_var("BACKGROUND_TASK_LIMIT");
    std::env::remove_var("BACKGROUND_TASK_GARBAGE_RESOLUTION");
}

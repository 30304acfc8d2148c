//! Tests for registry error types

use prometheus_background_tasks::core::TaskError;

#[test]
fn test_error_display() {
    let err = TaskError::NotFound("scan-1".into());
    assert_eq!(format!("{err}"), "no task registered under name `scan-1`");

    let err = TaskError::Cancelled("scan-2".into());
    assert_eq!(
        format!("{err}"),
        "task `scan-2` was cancelled before completion"
    );

    let err = TaskError::NotReady("scan-3".into());
    assert_eq!(format!("{err}"), "task `scan-3` has not finished yet");

    let err = TaskError::InvalidConfig("gc_resolution_secs must be greater than 0".into());
    assert_eq!(
        format!("{err}"),
        "invalid configuration: gc_resolution_secs must be greater than 0"
    );
}

#[test]
fn test_failed_is_transparent() {
    let err = TaskError::from(anyhow::anyhow!("boom"));
    assert_eq!(format!("{err}"), "boom");
}

#[test]
fn test_failed_preserves_source_for_downcast() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
    let err = TaskError::from(anyhow::Error::from(io));

    match err {
        TaskError::Failed(inner) => {
            let io = inner.downcast_ref::<std::io::Error>().expect("io error");
            assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

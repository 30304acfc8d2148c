//! Tests for tokio spawner utilities

use prometheus_background_tasks::runtime::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[tokio::test]
async fn test_spawn_returns_joinable_handle() {
    let spawner = TokioSpawner::current();
    let handle = spawner.spawn(async { 7 * 6 });
    assert_eq!(handle.await.expect("task completed"), 42);
}

#[test]
fn test_try_current_outside_runtime() {
    assert!(TokioSpawner::try_current().is_none());
}

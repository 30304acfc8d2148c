//! Auxiliary pool for tasks nobody needs to query.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::runtime::TokioSpawner;

/// A holding pen for fire-and-forget tasks, outside the named registry.
///
/// The pool keeps a strong reference to each in-flight task's handle so the
/// work is owned for its whole lifetime; every task removes its own
/// reference once it completes. No naming, no result retrieval, no
/// cancellation — purely dangling-reference prevention for callers who want
/// zero visibility into the work.
pub struct DetachedTasks {
    live: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
    next_key: AtomicU64,
    spawner: TokioSpawner,
}

impl DetachedTasks {
    /// Create an empty pool spawning onto `spawner`.
    #[must_use]
    pub fn new(spawner: TokioSpawner) -> Self {
        Self {
            live: Arc::new(Mutex::new(HashMap::new())),
            next_key: AtomicU64::new(0),
            spawner,
        }
    }

    /// Schedule `fut` and keep it alive until it completes.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        let live = Arc::clone(&self.live);

        // The lock is held across the spawn so a task that finishes
        // instantly still finds its own handle to remove: its removal
        // cannot run before the insertion below.
        let mut guard = self.live.lock();
        let handle = self.spawner.spawn(async move {
            fut.await;
            live.lock().remove(&key);
        });
        guard.insert(key, handle);
    }

    /// Number of tasks currently in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.lock().len()
    }

    /// Whether no tasks are in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.lock().is_empty()
    }
}

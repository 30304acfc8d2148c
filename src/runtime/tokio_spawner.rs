//! Tokio runtime spawner implementation.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Spawner binding registry tasks to a tokio runtime.
///
/// Wraps a runtime [`Handle`] so a registry can be constructed once and
/// spawn onto a specific runtime regardless of which thread later calls
/// into it. Spawns return the task's [`JoinHandle`], which the registry
/// keeps for cancellation.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    /// Create a spawner from a runtime handle.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create a spawner for the runtime the caller is running inside.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use
    /// [`try_current`](Self::try_current) to probe instead.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// As [`current`](Self::current), returning `None` outside a runtime.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Spawn a future onto the wrapped runtime.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(fut)
    }
}

impl std::fmt::Debug for TokioSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioSpawner").finish_non_exhaustive()
    }
}

//! Single-use task units over async and blocking callables.

use std::future::Future;
use std::pin::Pin;

use anyhow::anyhow;

use crate::core::AppResult;

type BoxedFuture<T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'static>>;
type BoxedClosure<T> = Box<dyn FnOnce() -> AppResult<T> + Send + 'static>;

/// A single invocable unit of work with its arguments already bound.
///
/// The unit is polymorphic over two callable shapes: native async work,
/// awaited in the calling task's context, and blocking work, dispatched to
/// the runtime's blocking thread pool so the scheduler thread never stalls.
/// Both shapes produce the same result and error propagation; the registry
/// never needs to know which it is running.
///
/// Arguments are bound by closure capture (`async move` / `move` closures),
/// so a unit carries everything its callable needs. Invocation consumes the
/// unit — it cannot run twice.
pub enum TaskUnit<T> {
    /// Native async work, awaited in place.
    Future(BoxedFuture<T>),
    /// Blocking work, offloaded to the runtime's blocking pool.
    Blocking(BoxedClosure<T>),
}

impl<T: Send + 'static> TaskUnit<T> {
    /// Wrap a future as a task unit.
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = AppResult<T>> + Send + 'static,
    {
        Self::Future(Box::pin(fut))
    }

    /// Wrap a blocking closure as a task unit.
    ///
    /// The closure runs on the runtime's blocking thread pool when the unit
    /// is invoked.
    pub fn blocking<F>(f: F) -> Self
    where
        F: FnOnce() -> AppResult<T> + Send + 'static,
    {
        Self::Blocking(Box::new(f))
    }

    /// Execute the unit and return its outcome.
    ///
    /// Async units are awaited directly. Blocking units run on the blocking
    /// pool and are awaited there; a panic inside a blocking unit surfaces
    /// as an `Err` carrying the panic message rather than unwinding the
    /// caller.
    ///
    /// # Errors
    ///
    /// Whatever error the callable itself produced, unchanged.
    pub async fn invoke(self) -> AppResult<T> {
        match self {
            Self::Future(fut) => fut.await,
            Self::Blocking(f) => match tokio::task::spawn_blocking(f).await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(blocking_failure(&join_error)),
            },
        }
    }
}

/// Map a blocking-pool join error to a task-body error, keeping the panic
/// payload's message when there is one.
fn blocking_failure(join_error: &tokio::task::JoinError) -> anyhow::Error {
    if join_error.is_panic() {
        anyhow!("blocking task panicked: {join_error}")
    } else {
        anyhow!("blocking task was cancelled by the runtime")
    }
}

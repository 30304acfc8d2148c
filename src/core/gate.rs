//! Concurrency admission gate for task bodies.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::Semaphore;

use crate::core::{AppResult, TaskUnit};

/// A bounded counting gate limiting how many task bodies run at once.
///
/// A gate built with capacity zero performs no limiting at all — units pass
/// straight through to invocation. With a positive capacity, a permit is
/// acquired before the unit body runs and released when the body finishes,
/// on every exit path: the permit is an owned RAII guard, so a task dropped
/// mid-execution still returns its permit, and a task cancelled while
/// waiting never acquired one.
///
/// Waiting for a permit suspends the requesting task cooperatively; it never
/// blocks the runtime thread.
#[derive(Clone)]
pub struct AdmissionGate {
    permits: Option<Arc<Semaphore>>,
    capacity: usize,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` concurrent bodies.
    ///
    /// Zero means unlimited.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: (capacity > 0).then(|| Arc::new(Semaphore::new(capacity))),
            capacity,
        }
    }

    /// Create a gate that performs no limiting.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// The configured capacity, or `None` when unlimited.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        (self.capacity > 0).then_some(self.capacity)
    }

    /// Permits currently free, or `None` when unlimited.
    #[must_use]
    pub fn available_permits(&self) -> Option<usize> {
        self.permits.as_ref().map(|s| s.available_permits())
    }

    /// Run a task unit through the gate.
    ///
    /// Without capacity, invokes immediately. Otherwise waits for a permit,
    /// invokes, and releases the permit regardless of outcome.
    ///
    /// # Errors
    ///
    /// Whatever error the unit body produced.
    pub async fn admit<T: Send + 'static>(&self, unit: TaskUnit<T>) -> AppResult<T> {
        let Some(semaphore) = &self.permits else {
            return unit.invoke().await;
        };
        let _permit = Arc::clone(semaphore)
            .acquire_owned()
            .await
            .map_err(|_| anyhow!("admission gate closed"))?;
        unit.invoke().await
    }
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("capacity", &self.capacity())
            .field("available", &self.available_permits())
            .finish()
    }
}

//! Named background-task registry with retrieval and garbage collection.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::core::{AdmissionGate, TaskError, TaskUnit};
use crate::runtime::TokioSpawner;
use crate::util::ids::generate_task_name;

/// Limits and timings governing a registry instance.
#[derive(Debug, Clone)]
pub struct RegistryLimits {
    /// Maximum task bodies executing concurrently; 0 means unlimited.
    pub max_concurrent_tasks: usize,
    /// Minimum age a terminal entry must reach before `purge` may evict it.
    pub retention: Duration,
    /// Interval between garbage-collector passes.
    pub gc_resolution: Duration,
}

/// Terminal outcome of a task body.
enum TaskOutcome<T> {
    Completed(T),
    Failed(anyhow::Error),
    Cancelled,
}

/// Per-entry outcome cell. The slot is the single source of truth for
/// terminal state: the spawned wrapper settles it on every exit path.
enum OutcomeSlot<T> {
    /// The body has not settled yet.
    Pending,
    /// Terminal outcome waiting to be collected.
    Ready(TaskOutcome<T>),
    /// The outcome was handed out while the entry was kept registered.
    Collected,
}

/// Settles the outcome slot exactly once, on every exit path.
///
/// Normal completion and body errors go through `settle`. If the wrapper
/// future is dropped first — abort, or a panic unwinding the body — the
/// `Drop` impl records the cancellation (or the panic) instead. The optional
/// notifier fires after the slot is written, so an observer woken by it
/// always sees a terminal slot.
struct Completion<T> {
    slot: Arc<Mutex<OutcomeSlot<T>>>,
    notify: Option<oneshot::Sender<()>>,
}

impl<T> Completion<T> {
    fn settle(mut self, outcome: TaskOutcome<T>) {
        *self.slot.lock() = OutcomeSlot::Ready(outcome);
        if let Some(tx) = self.notify.take() {
            let _ = tx.send(());
        }
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        {
            let mut slot = self.slot.lock();
            if matches!(*slot, OutcomeSlot::Pending) {
                *slot = OutcomeSlot::Ready(if std::thread::panicking() {
                    TaskOutcome::Failed(anyhow!("background task panicked"))
                } else {
                    TaskOutcome::Cancelled
                });
            }
        }
        if let Some(tx) = self.notify.take() {
            let _ = tx.send(());
        }
    }
}

/// A registered task: the spawned wrapper's handle, its outcome slot, and
/// the submission instant. The start time is fixed at submission and never
/// updated; re-submission under the same name replaces the whole entry.
struct TaskEntry<T> {
    handle: JoinHandle<()>,
    slot: Arc<Mutex<OutcomeSlot<T>>>,
    started_at: Instant,
}

impl<T> TaskEntry<T> {
    fn is_terminal(&self) -> bool {
        !matches!(*self.slot.lock(), OutcomeSlot::Pending)
    }
}

/// Registry of named background tasks.
///
/// Maps task names to in-flight or finished work. Submission schedules the
/// task body through the [`AdmissionGate`] on the configured spawner and
/// returns immediately; retrieval resolves a name to its outcome at most
/// once; a periodic garbage collector evicts terminal entries older than the
/// retention threshold.
///
/// All orchestration calls are synchronous and hold the internal locks only
/// for map and slot operations, never across a suspension point, so they are
/// safe to call from any async context.
///
/// Name collisions are not an error: submitting under a live name silently
/// replaces the entry, and the previous task keeps running untracked until
/// it finishes on its own.
pub struct TaskRegistry<T> {
    tasks: Mutex<HashMap<String, TaskEntry<T>>>,
    gate: AdmissionGate,
    spawner: TokioSpawner,
    limits: RegistryLimits,
}

impl<T: Send + 'static> TaskRegistry<T> {
    /// Create a registry with the given limits, spawning onto `spawner`.
    #[must_use]
    pub fn new(limits: RegistryLimits, spawner: TokioSpawner) -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            gate: AdmissionGate::new(limits.max_concurrent_tasks),
            spawner,
            limits,
        }
    }

    /// The admission gate bounding concurrent task bodies.
    #[must_use]
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// The limits this registry was built with.
    #[must_use]
    pub fn limits(&self) -> &RegistryLimits {
        &self.limits
    }

    /// Number of registered entries, running and terminal alike.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Whether an entry is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.lock().contains_key(name)
    }

    /// Schedule a task body under an explicit name.
    ///
    /// The unit is invoked through the admission gate inside the spawned
    /// task, so a full gate delays the body, never this call. The returned
    /// handle can be used to request cancellation or observe completion;
    /// the registry keeps its own reference for retrieval.
    pub fn submit(&self, name: impl Into<String>, unit: TaskUnit<T>) -> AbortHandle {
        self.submit_inner(name.into(), unit, None)
    }

    /// Schedule a task body under a generated time-ordered name.
    pub fn submit_auto_named(&self, unit: TaskUnit<T>) -> (String, AbortHandle) {
        let name = generate_task_name();
        let handle = self.submit_inner(name.clone(), unit, None);
        (name, handle)
    }

    /// Schedule a task body nobody will ever query.
    ///
    /// As [`submit_auto_named`](Self::submit_auto_named), plus a watcher
    /// that collects and removes the entry as soon as the task settles —
    /// discarding the result and logging any failure — so the caller never
    /// needs to poll it.
    pub fn submit_fire_and_forget(self: &Arc<Self>, unit: TaskUnit<T>) -> AbortHandle {
        let (tx, rx) = oneshot::channel();
        let name = generate_task_name();
        let handle = self.submit_inner(name.clone(), unit, Some(tx));

        let registry = Arc::clone(self);
        self.spawner.spawn(async move {
            // Resolves once the wrapper settles the slot (or is dropped);
            // either way the entry is terminal by the time this wakes.
            let _ = rx.await;
            registry.collect_quietly(&name);
        });
        handle
    }

    fn submit_inner(
        &self,
        name: String,
        unit: TaskUnit<T>,
        notify: Option<oneshot::Sender<()>>,
    ) -> AbortHandle {
        let slot = Arc::new(Mutex::new(OutcomeSlot::Pending));
        let completion = Completion {
            slot: Arc::clone(&slot),
            notify,
        };
        let gate = self.gate.clone();
        let handle = self.spawner.spawn(async move {
            let outcome = match gate.admit(unit).await {
                Ok(value) => TaskOutcome::Completed(value),
                Err(error) => TaskOutcome::Failed(error),
            };
            completion.settle(outcome);
        });
        let abort = handle.abort_handle();

        let entry = TaskEntry {
            handle,
            slot,
            started_at: Instant::now(),
        };
        let previous = self.tasks.lock().insert(name.clone(), entry);
        if previous.is_some() {
            debug!(
                task = %name,
                "name re-submitted; previous entry replaced, its task left running"
            );
        }
        debug!(task = %name, "background task submitted");
        abort
    }

    /// Resolve a name to its outcome.
    ///
    /// A terminal outcome is moved out of the registry — ownership
    /// transfers to the caller, exactly once. With `auto_remove` (the
    /// normal mode) the entry itself is deleted as a side effect, so a
    /// second call yields [`TaskError::NotFound`]. Without `auto_remove`
    /// the entry stays registered for bookkeeping and later `purge`, but
    /// the collected outcome is gone all the same.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] — nothing registered under `name`, or its
    ///   outcome was already collected.
    /// - [`TaskError::NotReady`] — still pending or running; the entry is
    ///   left untouched.
    /// - [`TaskError::Cancelled`] — the task was cancelled before settling.
    /// - [`TaskError::Failed`] — the task body's own error, unchanged.
    pub fn retrieve(&self, name: &str, auto_remove: bool) -> Result<T, TaskError> {
        let mut tasks = self.tasks.lock();
        let Some(entry) = tasks.get(name) else {
            return Err(TaskError::NotFound(name.to_string()));
        };

        let outcome = {
            let mut slot = entry.slot.lock();
            if matches!(*slot, OutcomeSlot::Pending) {
                return Err(TaskError::NotReady(name.to_string()));
            }
            match mem::replace(&mut *slot, OutcomeSlot::Collected) {
                OutcomeSlot::Ready(outcome) => Some(outcome),
                // Already handed out on an earlier keep-entry retrieval.
                OutcomeSlot::Pending | OutcomeSlot::Collected => None,
            }
        };
        if auto_remove {
            tasks.remove(name);
        }
        drop(tasks);

        match outcome {
            Some(TaskOutcome::Completed(value)) => Ok(value),
            Some(TaskOutcome::Failed(error)) => Err(TaskError::Failed(error)),
            Some(TaskOutcome::Cancelled) => Err(TaskError::Cancelled(name.to_string())),
            None => Err(TaskError::NotFound(name.to_string())),
        }
    }

    /// Delete the entry under `name` if present; silent no-op otherwise.
    ///
    /// With `auto_cancel`, cancellation of the underlying task is requested
    /// first. The entry disappears from lookups immediately even though the
    /// body may still be unwinding toward its next suspension point.
    pub fn remove(&self, name: &str, auto_cancel: bool) {
        let entry = self.tasks.lock().remove(name);
        if let Some(entry) = entry {
            if auto_cancel {
                entry.handle.abort();
            }
            debug!(task = %name, auto_cancel, "background task entry removed");
        }
    }

    /// Evict every entry that is terminal and older than the retention
    /// threshold, returning how many were evicted.
    ///
    /// Running entries and young terminal entries survive, whether or not
    /// anyone ever asked for their result. A stale entry's uncollected
    /// outcome is discarded through the same logged, non-throwing path used
    /// for fire-and-forget cleanup — an accepted trade-off for bounded
    /// memory.
    pub fn purge(&self) -> usize {
        let retention = self.limits.retention;
        let stale: Vec<String> = self
            .tasks
            .lock()
            .iter()
            .filter(|(_, entry)| entry.is_terminal() && entry.started_at.elapsed() > retention)
            .map(|(name, _)| name.clone())
            .collect();

        for name in &stale {
            self.collect_quietly(name);
        }
        stale.len()
    }

    /// Start the self-perpetuating garbage collector.
    ///
    /// A single persistent task that sleeps the configured resolution,
    /// purges, and repeats until aborted or process shutdown. The hosting
    /// application calls this once during warm-up; aborting the returned
    /// handle is the only stop lever.
    pub fn spawn_garbage_collector(self: &Arc<Self>) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        self.spawner.spawn(async move {
            info!(
                resolution_secs = registry.limits.gc_resolution.as_secs(),
                retention_secs = registry.limits.retention.as_secs(),
                "background task garbage collector started"
            );
            loop {
                tokio::time::sleep(registry.limits.gc_resolution).await;
                let purged = registry.purge();
                if purged > 0 {
                    info!(purged, "purged stale background task entries");
                } else {
                    debug!("garbage collector pass found nothing to purge");
                }
            }
        })
    }

    /// Collect and drop an entry, logging instead of raising.
    ///
    /// Shared by `purge` and the fire-and-forget watcher: no caller is
    /// positioned to observe a failure here, so a failure to clean up must
    /// never crash unrelated work.
    fn collect_quietly(&self, name: &str) {
        match self.retrieve(name, true) {
            Ok(_) => debug!(task = %name, "discarded uncollected background task result"),
            Err(TaskError::Failed(error)) => {
                warn!(task = %name, "background task failed: {error:#}");
            }
            Err(TaskError::Cancelled(_)) => {
                debug!(task = %name, "collected cancelled background task");
            }
            Err(TaskError::NotReady(_)) => {
                // The name was re-submitted under our feet; leave the new
                // entry alone.
                debug!(task = %name, "entry no longer terminal, left in place");
            }
            Err(TaskError::NotFound(_) | TaskError::InvalidConfig(_)) => {}
        }
    }
}

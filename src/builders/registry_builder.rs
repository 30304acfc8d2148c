//! Builders to construct a task registry from configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RegistryConfig;
use crate::core::{RegistryLimits, TaskError, TaskRegistry};
use crate::runtime::TokioSpawner;

/// Build a shared task registry from a validated configuration.
///
/// The registry is returned behind an `Arc` because fire-and-forget
/// submission and the garbage collector both hold a reference from inside
/// spawned tasks.
///
/// # Errors
///
/// [`TaskError::InvalidConfig`] when the configuration fails validation.
pub fn build_registry<T: Send + 'static>(
    cfg: &RegistryConfig,
    spawner: TokioSpawner,
) -> Result<Arc<TaskRegistry<T>>, TaskError> {
    cfg.validate().map_err(TaskError::InvalidConfig)?;

    let limits = RegistryLimits {
        max_concurrent_tasks: cfg.max_concurrent_tasks,
        retention: Duration::from_secs(cfg.retention_limit_secs),
        gc_resolution: Duration::from_secs(cfg.gc_resolution_secs),
    };
    Ok(Arc::new(TaskRegistry::new(limits, spawner)))
}

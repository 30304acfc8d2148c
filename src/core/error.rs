//! Error types for registry operations.

use thiserror::Error;

/// Errors produced when resolving or configuring background tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task is registered under the given name.
    #[error("no task registered under name `{0}`")]
    NotFound(String),
    /// The task was cancelled before it could produce an outcome.
    #[error("task `{0}` was cancelled before completion")]
    Cancelled(String),
    /// The task is still pending or running; retry later.
    #[error("task `{0}` has not finished yet")]
    NotReady(String),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The task body itself failed; the underlying error is preserved.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Application-facing result using anyhow for higher-level contexts.
///
/// Task bodies return this, so whatever error a body produces travels
/// through the registry intact and re-surfaces from
/// [`retrieve`](crate::core::TaskRegistry::retrieve) as
/// [`TaskError::Failed`].
pub type AppResult<T> = Result<T, anyhow::Error>;

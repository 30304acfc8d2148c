//! # Prometheus Background Tasks
//!
//! A named background-task registry with bounded concurrency for the
//! Prometheus AI Platform.
//!
//! This library manages in-process units of work that outlive the request
//! that started them. Callers submit work under a name (or let the registry
//! generate one), continue immediately, and resolve the name to a result or
//! error later — at most once. Abandoned results are reclaimed by a
//! background garbage collector after a retention window, so an unattended
//! registry never grows without bound.
//!
//! ## Core Problem Solved
//!
//! Request handlers in AI services routinely kick off work that takes longer
//! than the request is allowed to: model warm-ups, bulk invalidations,
//! long-running inference. That work needs three things the bare runtime
//! does not give you:
//!
//! - **A handle someone else can find**: the submitter and the collector are
//!   usually different requests, so tasks are addressed by name, not by an
//!   owned future.
//! - **A concurrency ceiling**: unbounded background work starves the
//!   runtime; the registry gates task bodies through a permit pool.
//! - **Bounded memory for the forgotten**: results nobody collects are
//!   evicted once they are both terminal and older than a retention
//!   threshold.
//!
//! ## Key Features
//!
//! - **Named submission**: explicit names, generated time-ordered names, or
//!   fully fire-and-forget with automatic cleanup
//! - **Admission gate**: optional permit pool bounding how many task bodies
//!   run at once; waiting happens inside the spawned task, never in the
//!   caller
//! - **At-most-once retrieval**: a terminal outcome is handed out exactly
//!   once; task-body errors propagate transparently
//! - **Self-maintaining**: a periodic collector purges stale terminal
//!   entries through the same logged, non-throwing path used for
//!   fire-and-forget cleanup
//! - **Blocking work supported**: blocking closures are offloaded to the
//!   runtime's blocking pool so the scheduler thread never stalls
//!
//! ## Example
//!
//! ```rust,ignore
//! use prometheus_background_tasks::builders::build_registry;
//! use prometheus_background_tasks::config::RegistryConfig;
//! use prometheus_background_tasks::core::{TaskError, TaskUnit};
//! use prometheus_background_tasks::runtime::TokioSpawner;
//!
//! let config = RegistryConfig::from_env()?;
//! let registry = build_registry::<u64>(&config, TokioSpawner::current())?;
//!
//! // Application warm-up: start the collector once.
//! let _gc = registry.spawn_garbage_collector();
//!
//! // Per-request: submit, hand the name to the client.
//! let (name, _handle) = registry.submit_auto_named(TaskUnit::from_future(async {
//!     Ok(expensive_scan().await)
//! }));
//!
//! // A later request resolves the name exactly once.
//! match registry.retrieve(&name, true) {
//!     Ok(value) => respond(value),
//!     Err(TaskError::NotReady(_)) => respond_retry_later(),
//!     Err(e) => respond_error(e),
//! }
//! ```
//!
//! For complete examples, see `tests/registry_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core task registry, admission gate, and task unit abstractions.
pub mod core;
/// Configuration models for the registry and garbage collector.
pub mod config;
/// Builders to construct a registry from configuration.
pub mod builders;
/// Runtime adapters for spawning onto tokio.
pub mod runtime;
/// Shared utilities.
pub mod util;

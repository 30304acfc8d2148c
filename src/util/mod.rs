//! Shared utilities.

pub mod ids;
pub mod telemetry;

pub use ids::generate_task_name;
pub use telemetry::init_tracing;

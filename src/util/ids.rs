//! Collision-resistant, time-ordered task name generation.

use chrono::Utc;
use uuid::Uuid;

/// Generate a unique task name.
///
/// The name is a coarse UTC timestamp prefix followed by an uppercase
/// UUIDv4, so auto-named tasks sort lexically by submission time while
/// staying collision-free without any caller coordination.
#[must_use]
pub fn generate_task_name() -> String {
    let stamp = Utc::now().format("%Y%m-%d%H-%M%S");
    let suffix = Uuid::new_v4().to_string().to_uppercase();
    format!("{stamp}-{suffix}")
}

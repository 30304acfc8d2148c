//! Telemetry helpers for structured logging and tracing.

/// Initialize tracing for the hosting application.
///
/// Installs an env-filtered fmt subscriber unless one is already set, so
/// embedding applications keep full control over their own subscriber.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

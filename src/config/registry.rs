//! Registry configuration structures.

use serde::{Deserialize, Serialize};

const fn default_gc_resolution_secs() -> u64 {
    30
}

// Six hours.
const fn default_retention_secs() -> u64 {
    6 * 60 * 60
}

/// Background-task registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum task bodies running at once; 0 means unlimited.
    #[serde(default)]
    pub max_concurrent_tasks: usize,
    /// Seconds between garbage-collector passes.
    #[serde(default = "default_gc_resolution_secs")]
    pub gc_resolution_secs: u64,
    /// Minimum age in seconds a terminal entry must reach before the
    /// garbage collector may evict it.
    #[serde(default = "default_retention_secs")]
    pub retention_limit_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 0,
            gc_resolution_secs: default_gc_resolution_secs(),
            retention_limit_secs: default_retention_secs(),
        }
    }
}

impl RegistryConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// A human-readable description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.gc_resolution_secs == 0 {
            return Err("gc_resolution_secs must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse a registry configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Parse or validation failure, as a human-readable string.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, honoring a `.env`
    /// file when present.
    ///
    /// Recognized variables, all optional: `BACKGROUND_TASK_LIMIT`,
    /// `BACKGROUND_TASK_GARBAGE_RESOLUTION`,
    /// `BACKGROUND_TASK_PERSISTENCE_LIMIT`.
    ///
    /// # Errors
    ///
    /// An unparsable variable or a validation failure, as a human-readable
    /// string.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let cfg = Self {
            max_concurrent_tasks: read_env("BACKGROUND_TASK_LIMIT", 0)?,
            gc_resolution_secs: read_env(
                "BACKGROUND_TASK_GARBAGE_RESOLUTION",
                default_gc_resolution_secs(),
            )?,
            retention_limit_secs: read_env(
                "BACKGROUND_TASK_PERSISTENCE_LIMIT",
                default_retention_secs(),
            )?,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn read_env<V>(key: &str, default: V) -> Result<V, String>
where
    V: std::str::FromStr,
    V::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key} invalid: {e}")),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(format!("{key} unreadable: {e}")),
    }
}

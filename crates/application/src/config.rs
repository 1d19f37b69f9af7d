//! Kernel configuration loaded from environment variables.

use serde::{Deserialize, Serialize};

/// What [`Mediator::register`](crate::Mediator::register) does when a handler
/// is already registered for the request type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationPolicy {
    /// Replace the existing handler; the last registration wins.
    #[default]
    Overwrite,
    /// Keep the existing handler and fail the new registration.
    Reject,
}

impl std::str::FromStr for RegistrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(RegistrationPolicy::Overwrite),
            "reject" => Ok(RegistrationPolicy::Reject),
            other => Err(format!("unknown registration policy: {other}")),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Kernel configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `KERNEL_HANDLER_REGISTRATION`: `overwrite` or `reject` (default: `overwrite`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `KERNEL_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub registration_policy: RegistrationPolicy,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl KernelConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            registration_policy: lookup("KERNEL_HANDLER_REGISTRATION")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.registration_policy),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("KERNEL_LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_format),
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            registration_policy: RegistrationPolicy::Overwrite,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

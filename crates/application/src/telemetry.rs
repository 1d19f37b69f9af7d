//! Tracing subscriber setup for services built on the kernel.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::{KernelConfig, LogFormat};

/// Installs the global tracing subscriber described by `config`.
///
/// An invalid `log_level` directive falls back to `info`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &KernelConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

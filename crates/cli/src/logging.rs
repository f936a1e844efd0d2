//! Tracing subscriber setup for the `gallery` binary.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

const FALLBACK_LEVEL: &str = "info";

/// Handle to the installed subscriber's filter.
pub struct LogHandle {
    /// `None` when `RUST_LOG` chose the filter or another subscriber was
    /// already installed.
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Switch to the `log-level` from `config.toml` unless `RUST_LOG` is set.
    pub fn apply_config_level(&self, level: &str) {
        if let Some(handle) = &self.reload {
            if let Err(e) = handle.reload(filter_for(level)) {
                tracing::warn!(error = %e, "could not apply configured log level");
            }
        }
    }
}

/// Install a stderr subscriber before anything else runs, so events from
/// config loading are kept. Stdout is left for entrypoint output.
pub fn init_logging() -> LogHandle {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| filter_for(FALLBACK_LEVEL)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok();

    LogHandle {
        reload: (installed && !env_set).then_some(handle),
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

//! Diagnostics for the user, kept apart from the table written to stdout.
//!
//! The pipeline never reaches for a global logger for messages a caller may
//! want to assert on; it is handed a [`Reporter`] instead.

use tracing::{info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to the process-wide `tracing` subscriber.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Installs the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output when
/// `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

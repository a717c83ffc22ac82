//! Log subscriber setup for the binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::Result;

/// Returns the filter for `verbosity` repetitions of `-v`.
///
/// `RUST_LOG` wins when it is set and valid; otherwise the level is `info`,
/// `debug` for one `-v`, and `trace` for more.
#[must_use]
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

/// Installs the global subscriber, writing to standard error.
///
/// # Errors
///
/// Returns [`crate::error::YamleoError::Logging`] if a global subscriber is
/// already installed.
pub fn init(verbosity: u8) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

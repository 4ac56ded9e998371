//! Logging setup for the update prover.
//!
//! Logs go to stderr so that stdout only carries the produced update.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the global tracing subscriber at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[allow(clippy::missing_errors_doc)]
pub fn init_observability(level: Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(true),
        )
        .try_init()
        .context("Failed to set global default subscriber")
}

use std::{io, sync::Once};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `MONTY_LOG=monty_engine=debug`.
pub const LOG_ENV: &str = "MONTY_LOG";

/// Installs the global subscriber, writing to stderr.
///
/// Uses `default_filter` when `MONTY_LOG` is unset or invalid. Only the first
/// call has any effect.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

//! Structured logging setup.
//!
//! Logging starts after the configuration is resolved, since the log level
//! follows the `debug` setting. `RUST_LOG` overrides it when set.

use std::io::IsTerminal;

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

use crate::config::EnvWarning;

/// Default filter directive for the given debug setting.
#[must_use]
pub const fn level_for(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Initialize tracing.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed in this process.
pub fn init_tracing(debug: bool) {
    let level = level_for(debug);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stdout().is_terminal());

    Registry::default().with(env_filter).with(fmt_layer).init();

    tracing::debug!("Tracing initialized: level={}", level);
}

/// Report environment variables that were ignored during resolution.
pub fn report_env_warnings(warnings: &[EnvWarning]) {
    for warning in warnings {
        tracing::warn!(
            key = %warning.key,
            value = %warning.raw,
            "Ignoring unparseable environment variable, using default"
        );
    }
}

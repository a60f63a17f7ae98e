//! hookd - webhook execution server
//!
//! Entry point: resolves the startup configuration.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use hookd::auth::AuthRegistry;
use hookd::observability::{init_tracing, report_env_warnings};
use hookd::{config, Error, Result};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        // Usage errors print the usage and exit non-zero; --help exits 0.
        Err(Error::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("hookd: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

fn run() -> Result<()> {
    let registry = AuthRegistry::builtin();
    let loaded = config::load(&registry)?;
    let config = loaded.config;

    init_tracing(config.debug);

    tracing::info!("hookd v{} starting...", env!("CARGO_PKG_VERSION"));

    report_env_warnings(&loaded.warnings);

    let auth = registry.resolve(&config.auth)?;
    tracing::debug!(
        method = %config.auth,
        usage = auth.usage(),
        "Authentication method selected"
    );

    tracing::info!(
        listen_addr = %config.listen_addr,
        nb_workers = config.nb_workers,
        debug = config.debug,
        timeout_secs = config.timeout,
        scripts_dir = %config.scripts_dir.display(),
        auth = %config.auth,
        auth_enabled = config.auth_enabled(),
        "Configuration loaded"
    );

    Ok(())
}

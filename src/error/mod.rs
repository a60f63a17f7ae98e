//! Error types and Result aliases for hookd.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.
//!
//! Environment variables never produce errors: a malformed value falls back
//! to the built-in default (see [`crate::config::EnvValue`]). Only the command
//! line and the authentication method selection can fail startup.

use thiserror::Error;

/// Result type alias using hookd's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hookd operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command-line parsing failed (unknown flag, malformed value), or the
    /// user asked for `--help`/`--version`.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Authentication method error.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Authentication method errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The selected method is not in the registry.
    #[error("unknown authentication method '{name}' (available: {available})")]
    UnknownMethod { name: String, available: String },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Command-line errors defer to clap (2 for usage errors, 0 for help).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(err) => err.exit_code(),
            Self::Auth(_) => 1,
        }
    }
}

impl AuthError {
    /// Create an unknown-method error listing the registered names.
    pub fn unknown_method<'a>(
        name: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownMethod {
            name: name.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

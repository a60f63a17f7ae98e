//! Configuration management for hookd.
//!
//! Every setting is resolved from, in order of priority:
//! - Command-line arguments (highest priority)
//! - `APP_*` environment variables
//! - Built-in defaults (lowest priority)
//!
//! Resolution happens once, in [`load`], before anything else starts.

mod builder;
mod env;
mod settings;

pub use builder::{auth_param_help, load, ConfigBuilder, Loaded, AUTH_PARAM_BANNER};
pub use env::{parse_bool, EnvResolver, EnvSource, EnvValue, EnvWarning, ProcessEnv, ENV_PREFIX};
pub use settings::{
    Config, DEFAULT_AUTH, DEFAULT_AUTH_PARAM, DEFAULT_DEBUG, DEFAULT_LISTEN_ADDR,
    DEFAULT_NB_WORKERS, DEFAULT_SCRIPTS_DIR, DEFAULT_TIMEOUT_SECS,
};

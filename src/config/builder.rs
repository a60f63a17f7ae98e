//! Command-line declaration and three-tier resolution.
//!
//! Each setting is resolved from the environment first, and the result is
//! installed as the default of its command-line argument. Parsing then yields
//! the final value: an explicit flag wins, otherwise the env-aware default
//! applies. No "was this flag given" bookkeeping is needed.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Command, CommandFactory, FromArgMatches, Parser};

use super::env::{parse_bool, EnvResolver, EnvSource, EnvValue, EnvWarning, ProcessEnv};
use super::settings::{
    Config, DEFAULT_AUTH, DEFAULT_AUTH_PARAM, DEFAULT_DEBUG, DEFAULT_LISTEN_ADDR,
    DEFAULT_NB_WORKERS, DEFAULT_SCRIPTS_DIR, DEFAULT_TIMEOUT_SECS,
};
use crate::auth::AuthRegistry;
use crate::Result;

/// First line of the `--auth-param` help text.
pub const AUTH_PARAM_BANNER: &str = "Authentication method. Available methods: ";

/// Webhook execution server
#[derive(Parser, Debug)]
#[command(name = "hookd")]
#[command(version, about, long_about = None)]
#[command(args_override_self = true)]
struct Cli {
    /// HTTP service address (e.g. ':8080')
    #[arg(short = 'l', long = "listen", default_value = DEFAULT_LISTEN_ADDR)]
    listen_addr: String,

    /// The number of workers to start
    #[arg(long, default_value_t = DEFAULT_NB_WORKERS)]
    nb_workers: usize,

    /// Output debug logs
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = DEFAULT_DEBUG,
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    debug: bool,

    /// Hook maximum delay before timeout (in seconds)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Scripts directory
    #[arg(long = "scripts", default_value = DEFAULT_SCRIPTS_DIR)]
    scripts_dir: PathBuf,

    /// Authentication method
    #[arg(long, default_value = DEFAULT_AUTH)]
    auth: String,

    /// Authentication method parameter
    #[arg(long, default_value = DEFAULT_AUTH_PARAM)]
    auth_param: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            listen_addr: cli.listen_addr,
            nb_workers: cli.nb_workers,
            debug: cli.debug,
            timeout: cli.timeout,
            scripts_dir: cli.scripts_dir,
            auth: cli.auth,
            auth_param: cli.auth_param,
        }
    }
}

/// A resolved configuration plus the environment values that were ignored
/// while resolving it.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// The configuration snapshot.
    pub config: Config,
    /// Unparseable `APP_*` variables that fell back to the built-in default.
    pub warnings: Vec<EnvWarning>,
}

/// Env-resolved values, used as argument defaults.
#[derive(Debug)]
struct EnvDefaults {
    listen_addr: String,
    nb_workers: usize,
    debug: bool,
    timeout: u64,
    scripts_dir: String,
    auth: String,
    auth_param: String,
    warnings: Vec<EnvWarning>,
}

fn settle<T>(value: EnvValue<T>, fallback: T, warnings: &mut Vec<EnvWarning>) -> T {
    warnings.extend(value.warning());
    value.or_fallback(fallback)
}

/// Help text for `--auth-param`: the banner, then one `name:usage` line per
/// registered method, in identifier order.
#[must_use]
pub fn auth_param_help(registry: &AuthRegistry) -> String {
    let mut help = String::from(AUTH_PARAM_BANNER);
    for (name, method) in registry.iter() {
        help.push('\n');
        help.push_str(name);
        help.push(':');
        help.push_str(method.usage());
    }
    help
}

/// Declares the recognized settings and resolves them.
#[derive(Debug)]
pub struct ConfigBuilder<'a, E> {
    env: EnvResolver<E>,
    registry: &'a AuthRegistry,
}

impl<'a, E: EnvSource> ConfigBuilder<'a, E> {
    /// Create a builder reading `env` and documenting `registry`.
    pub const fn new(env: E, registry: &'a AuthRegistry) -> Self {
        Self {
            env: EnvResolver::new(env),
            registry,
        }
    }

    fn env_defaults(&self) -> EnvDefaults {
        let mut warnings = Vec::new();
        let env = &self.env;

        let nb_workers = settle(
            env.lookup_int("NB_WORKERS"),
            DEFAULT_NB_WORKERS,
            &mut warnings,
        );
        let debug = settle(env.lookup_bool("DEBUG"), DEFAULT_DEBUG, &mut warnings);
        let timeout = settle(
            env.lookup_int("HOOK_TIMEOUT"),
            DEFAULT_TIMEOUT_SECS,
            &mut warnings,
        );

        EnvDefaults {
            listen_addr: env.resolve_string("LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            nb_workers,
            debug,
            timeout,
            scripts_dir: env.resolve_string("SCRIPTS_DIR", DEFAULT_SCRIPTS_DIR),
            auth: env.resolve_string("AUTH", DEFAULT_AUTH),
            auth_param: env.resolve_string("AUTH_PARAM", DEFAULT_AUTH_PARAM),
            warnings,
        }
    }

    fn declare(&self, defaults: &EnvDefaults) -> Command {
        Cli::command()
            .mut_arg("listen_addr", |arg| {
                arg.default_value(defaults.listen_addr.clone())
            })
            .mut_arg("nb_workers", |arg| {
                arg.default_value(defaults.nb_workers.to_string())
            })
            .mut_arg("debug", |arg| arg.default_value(defaults.debug.to_string()))
            .mut_arg("timeout", |arg| {
                arg.default_value(defaults.timeout.to_string())
            })
            .mut_arg("scripts_dir", |arg| {
                arg.default_value(defaults.scripts_dir.clone())
            })
            .mut_arg("auth", |arg| arg.default_value(defaults.auth.clone()))
            .mut_arg("auth_param", |arg| {
                arg.default_value(defaults.auth_param.clone())
                    .help(auth_param_help(self.registry))
            })
    }

    /// The fully declared command: env-aware defaults and generated help.
    #[must_use]
    pub fn command(&self) -> Command {
        self.declare(&self.env_defaults())
    }

    /// Resolve the configuration from `args` (including the program name).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cli`] for an unknown flag, a malformed value,
    /// or a `--help`/`--version` request.
    pub fn build_from<I, T>(&self, args: I) -> Result<Loaded>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let defaults = self.env_defaults();
        let matches = self.declare(&defaults).try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;

        Ok(Loaded {
            config: cli.into(),
            warnings: defaults.warnings,
        })
    }
}

/// Resolve the configuration from the process arguments and environment.
///
/// Called once from the entry point.
///
/// # Errors
///
/// Returns [`crate::Error::Cli`] if the command line cannot be parsed.
pub fn load(registry: &AuthRegistry) -> Result<Loaded> {
    ConfigBuilder::new(ProcessEnv, registry).build_from(std::env::args_os())
}

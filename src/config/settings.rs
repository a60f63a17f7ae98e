//! Resolved configuration snapshot.

use std::path::PathBuf;
use std::time::Duration;

/// Built-in default for `--listen`.
pub const DEFAULT_LISTEN_ADDR: &str = ":8080";
/// Built-in default for `--nb-workers`.
pub const DEFAULT_NB_WORKERS: usize = 2;
/// Built-in default for `--debug`.
pub const DEFAULT_DEBUG: bool = false;
/// Built-in default for `--timeout`, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Built-in default for `--scripts`.
pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";
/// Built-in default for `--auth`.
pub const DEFAULT_AUTH: &str = "none";
/// Built-in default for `--auth-param`.
pub const DEFAULT_AUTH_PARAM: &str = "";

/// Process configuration, resolved once at startup and read-only afterwards.
///
/// Each field is the command-line value if given, else the `APP_*`
/// environment value if it parses, else the built-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP service address.
    pub listen_addr: String,

    /// Number of hook workers.
    pub nb_workers: usize,

    /// Verbose logging.
    pub debug: bool,

    /// Maximum hook run time, in seconds.
    pub timeout: u64,

    /// Directory holding the hook scripts.
    pub scripts_dir: PathBuf,

    /// Authentication method name.
    pub auth: String,

    /// Parameter passed to the authentication method.
    pub auth_param: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            nb_workers: DEFAULT_NB_WORKERS,
            debug: DEFAULT_DEBUG,
            timeout: DEFAULT_TIMEOUT_SECS,
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            auth: DEFAULT_AUTH.to_string(),
            auth_param: DEFAULT_AUTH_PARAM.to_string(),
        }
    }
}

impl Config {
    /// Hook timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Whether an authentication method other than `none` is selected.
    #[must_use]
    pub fn auth_enabled(&self) -> bool {
        self.auth != DEFAULT_AUTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listen_addr, ":8080");
        assert_eq!(config.nb_workers, 2);
        assert!(!config.debug);
        assert_eq!(config.timeout, 10);
        assert_eq!(config.scripts_dir, PathBuf::from("scripts"));
        assert_eq!(config.auth, "none");
        assert_eq!(config.auth_param, "");
    }

    #[test]
    fn test_timeout_duration() {
        let config = Config {
            timeout: 42,
            ..Default::default()
        };
        assert_eq!(config.timeout_duration(), Duration::from_secs(42));
    }

    #[test]
    fn test_auth_enabled() {
        assert!(!Config::default().auth_enabled());
        let config = Config {
            auth: "basic".to_string(),
            ..Default::default()
        };
        assert!(config.auth_enabled());
    }

    #[test]
    fn test_config_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}

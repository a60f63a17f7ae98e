//! Environment variable resolution.
//!
//! Every setting is looked up under the `APP_` namespace. Lookups never fail:
//! an absent or unparseable variable resolves to the caller's fallback. The
//! conversion from a failed parse to the fallback happens in exactly one
//! place, [`EnvValue::or_fallback`].

use std::collections::HashMap;
use std::str::FromStr;

/// Namespace prepended to every setting key.
pub const ENV_PREFIX: &str = "APP_";

/// Source of environment variables.
pub trait EnvSource {
    /// Raw value of `key`, or `None` if unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset.
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Outcome of reading and parsing one environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue<T> {
    /// The variable is not set.
    Absent,
    /// The variable is set and parsed.
    Parsed(T),
    /// The variable is set but does not parse as the expected type.
    Invalid {
        /// Full, prefixed variable name.
        key: String,
        /// The raw value found.
        raw: String,
    },
}

impl<T> EnvValue<T> {
    /// Collapse to a concrete value, using `fallback` when the variable is
    /// absent or invalid.
    ///
    /// An invalid value is not an error. Callers that want to report it take
    /// [`EnvValue::warning`] first.
    pub fn or_fallback(self, fallback: T) -> T {
        match self {
            Self::Parsed(value) => value,
            Self::Absent | Self::Invalid { .. } => fallback,
        }
    }

    /// The offending variable if this value is invalid.
    #[must_use]
    pub fn warning(&self) -> Option<EnvWarning> {
        match self {
            Self::Invalid { key, raw } => Some(EnvWarning {
                key: key.clone(),
                raw: raw.clone(),
            }),
            _ => None,
        }
    }
}

/// An environment variable that was ignored because it did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvWarning {
    /// Full, prefixed variable name.
    pub key: String,
    /// The raw value found.
    pub raw: String,
}

/// Parse a boolean using the accepted spellings.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and
/// `0`, `f`, `F`, `FALSE`, `false`, `False`.
///
/// # Errors
///
/// Returns an error message naming the rejected input.
pub fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("invalid boolean '{s}'")),
    }
}

/// Resolves settings from an [`EnvSource`] under the [`ENV_PREFIX`] namespace.
///
/// Nothing is cached; each call re-reads the source.
#[derive(Debug, Clone, Default)]
pub struct EnvResolver<E> {
    source: E,
}

impl<E: EnvSource> EnvResolver<E> {
    /// Create a resolver over `source`.
    pub const fn new(source: E) -> Self {
        Self { source }
    }

    /// Full variable name for a setting key.
    #[must_use]
    pub fn key(key: &str) -> String {
        format!("{ENV_PREFIX}{key}")
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.source.var(&Self::key(key))
    }

    /// Look up `key` and parse it with `parse`.
    fn lookup_with<T, P, Err>(&self, key: &str, parse: P) -> EnvValue<T>
    where
        P: FnOnce(&str) -> std::result::Result<T, Err>,
    {
        match self.raw(key) {
            None => EnvValue::Absent,
            Some(raw) => match parse(&raw) {
                Ok(value) => EnvValue::Parsed(value),
                Err(_) => EnvValue::Invalid {
                    key: Self::key(key),
                    raw,
                },
            },
        }
    }

    /// Raw value of `APP_<key>`, or `fallback` if unset.
    ///
    /// An empty variable is still set and wins over the fallback.
    #[must_use]
    pub fn resolve_string(&self, key: &str, fallback: &str) -> String {
        self.raw(key).unwrap_or_else(|| fallback.to_string())
    }

    /// Tagged integer lookup of `APP_<key>`.
    #[must_use]
    pub fn lookup_int<T: FromStr>(&self, key: &str) -> EnvValue<T> {
        self.lookup_with(key, str::parse::<T>)
    }

    /// Integer value of `APP_<key>`, or `fallback` if unset or unparseable.
    #[must_use]
    pub fn resolve_int<T: FromStr>(&self, key: &str, fallback: T) -> T {
        self.lookup_int(key).or_fallback(fallback)
    }

    /// Tagged boolean lookup of `APP_<key>`.
    #[must_use]
    pub fn lookup_bool(&self, key: &str) -> EnvValue<bool> {
        self.lookup_with(key, parse_bool)
    }

    /// Boolean value of `APP_<key>`, or `fallback` if unset or unparseable.
    #[must_use]
    pub fn resolve_bool(&self, key: &str, fallback: bool) -> bool {
        self.lookup_bool(key).or_fallback(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(vars: &[(&str, &str)]) -> EnvResolver<HashMap<String, String>> {
        EnvResolver::new(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_key_is_prefixed() {
        assert_eq!(
            EnvResolver::<ProcessEnv>::key("LISTEN_ADDR"),
            "APP_LISTEN_ADDR"
        );
    }

    #[test]
    fn test_resolve_string_present() {
        let env = resolver(&[("APP_LISTEN_ADDR", "0.0.0.0:9000")]);
        assert_eq!(env.resolve_string("LISTEN_ADDR", ":8080"), "0.0.0.0:9000");
    }

    #[test]
    fn test_resolve_string_absent() {
        let env = resolver(&[]);
        assert_eq!(env.resolve_string("LISTEN_ADDR", ":8080"), ":8080");
    }

    #[test]
    fn test_resolve_string_ignores_unprefixed() {
        let env = resolver(&[("LISTEN_ADDR", "0.0.0.0:9000")]);
        assert_eq!(env.resolve_string("LISTEN_ADDR", ":8080"), ":8080");
    }

    #[test]
    fn test_resolve_string_empty_is_present() {
        let env = resolver(&[("APP_AUTH", "")]);
        assert_eq!(env.resolve_string("AUTH", "none"), "");
    }

    #[test]
    fn test_resolve_int() {
        let env = resolver(&[("APP_NB_WORKERS", "5")]);
        assert_eq!(env.resolve_int("NB_WORKERS", 2_usize), 5);
        assert_eq!(env.resolve_int("HOOK_TIMEOUT", 10_u64), 10);
    }

    #[test]
    fn test_resolve_int_invalid_falls_back() {
        let env = resolver(&[("APP_NB_WORKERS", "many"), ("APP_HOOK_TIMEOUT", "-3")]);
        assert_eq!(env.resolve_int("NB_WORKERS", 2_usize), 2);
        assert_eq!(env.resolve_int("HOOK_TIMEOUT", 10_u64), 10);
        assert_eq!(env.resolve_int("HOOK_TIMEOUT", 10_i64), -3);
    }

    #[test]
    fn test_lookup_int_tags_invalid() {
        let env = resolver(&[("APP_NB_WORKERS", "2.5")]);
        let value = env.lookup_int::<usize>("NB_WORKERS");
        assert_eq!(
            value,
            EnvValue::Invalid {
                key: "APP_NB_WORKERS".to_string(),
                raw: "2.5".to_string(),
            }
        );
        assert_eq!(
            value.warning(),
            Some(EnvWarning {
                key: "APP_NB_WORKERS".to_string(),
                raw: "2.5".to_string(),
            })
        );
    }

    #[test]
    fn test_lookup_absent_and_parsed_have_no_warning() {
        let env = resolver(&[("APP_NB_WORKERS", "3")]);
        assert_eq!(env.lookup_int::<usize>("NB_WORKERS"), EnvValue::Parsed(3));
        assert_eq!(env.lookup_int::<usize>("HOOK_TIMEOUT"), EnvValue::Absent);
        assert!(env.lookup_int::<usize>("NB_WORKERS").warning().is_none());
        assert!(env.lookup_int::<usize>("HOOK_TIMEOUT").warning().is_none());
    }

    #[test]
    fn test_resolve_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            let env = resolver(&[("APP_DEBUG", raw)]);
            assert!(env.resolve_bool("DEBUG", false), "'{raw}' should be true");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            let env = resolver(&[("APP_DEBUG", raw)]);
            assert!(!env.resolve_bool("DEBUG", true), "'{raw}' should be false");
        }
    }

    #[test]
    fn test_resolve_bool_invalid_falls_back() {
        for raw in ["notabool", "yes", "", "tRuE"] {
            let env = resolver(&[("APP_DEBUG", raw)]);
            assert!(!env.resolve_bool("DEBUG", false), "'{raw}' should fall back");
            assert!(env.resolve_bool("DEBUG", true), "'{raw}' should fall back");
        }
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let env = resolver(&[]);
        assert_eq!(env.resolve_int("NB_WORKERS", 2_usize), 2);
        assert_eq!(env.resolve_int("NB_WORKERS", 7_usize), 7);
        assert_eq!(env.resolve_string("AUTH", "none"), "none");
        assert_eq!(env.resolve_string("AUTH", "basic"), "basic");
    }

    #[test]
    fn test_parse_bool_error_names_input() {
        let err = parse_bool("maybe").unwrap_err();
        assert!(err.contains("maybe"));
    }
}

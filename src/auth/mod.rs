//! Authentication method registry.
//!
//! A name-keyed catalog of pluggable authentication strategies. At startup
//! the registry is only used to describe the available methods in the
//! `--auth-param` help text and to check that the selected `--auth` method
//! exists; the strategies themselves run in the HTTP layer.

use std::collections::BTreeMap;

use crate::error::AuthError;

/// A pluggable authentication strategy.
pub trait AuthMethod: Send + Sync {
    /// Human-readable description of the method and its `--auth-param`.
    fn usage(&self) -> &str;
}

/// No authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthMethod for NoAuth {
    fn usage(&self) -> &str {
        "No authentication"
    }
}

/// HTTP basic authentication backed by an htpasswd file.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuth;

impl AuthMethod for BasicAuth {
    fn usage(&self) -> &str {
        "HTTP basic authentication. The parameter is the path of an htpasswd file (bcrypt entries only)"
    }
}

/// Catalog of authentication methods, enumerated in identifier order.
#[derive(Default)]
pub struct AuthRegistry {
    methods: BTreeMap<String, Box<dyn AuthMethod>>,
}

impl std::fmt::Debug for AuthRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRegistry")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AuthRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `none` and `basic` methods.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("none", NoAuth);
        registry.register("basic", BasicAuth);
        registry
    }

    /// Add or replace a method under `name`.
    pub fn register(&mut self, name: impl Into<String>, method: impl AuthMethod + 'static) {
        self.methods.insert(name.into(), Box::new(method));
    }

    /// Look up a method by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn AuthMethod> {
        self.methods.get(name).map(|method| &**method)
    }

    /// Look up the method selected by `--auth`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownMethod`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<&dyn AuthMethod, AuthError> {
        self.get(name)
            .ok_or_else(|| AuthError::unknown_method(name, self.names()))
    }

    /// `(name, method)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn AuthMethod)> {
        self.methods
            .iter()
            .map(|(name, method)| (name.as_str(), &**method))
    }

    /// Registered names in identifier order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

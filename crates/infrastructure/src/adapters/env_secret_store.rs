//! Environment-based secret store adapter
//!
//! Reads secrets from environment variables. Useful for local development
//! and containerized deployments where secrets are injected via environment.

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument, warn};

/// Secret store that reads from environment variables
///
/// Keys are transformed to uppercase with hyphens replaced by underscores.
/// For example: "google_api_key" becomes "GOOGLE_API_KEY".
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore {
    /// Optional prefix for all environment variable lookups
    prefix: Option<String>,
}

impl EnvSecretStore {
    /// Create a new environment secret store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a prefix for all environment variable lookups
    ///
    /// # Example
    /// ```
    /// use infrastructure::EnvSecretStore;
    ///
    /// let store = EnvSecretStore::with_prefix("VOXPAGE");
    /// // Looking up "google_api_key" will check "VOXPAGE_GOOGLE_API_KEY"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Transform a key to an environment variable name
    fn key_to_env_var(&self, key: &str) -> String {
        let normalized = key.replace('-', "_").to_uppercase();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{normalized}"),
            None => normalized,
        }
    }
}

#[async_trait]
impl SecretStorePort for EnvSecretStore {
    #[instrument(skip(self), fields(env_var))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let env_var = self.key_to_env_var(key);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(value) => {
                debug!("Retrieved secret from environment variable");
                Ok(value)
            },
            Err(env::VarError::NotPresent) => {
                warn!(env_var = %env_var, "Secret not found in environment");
                Err(ApplicationError::NotFound(format!(
                    "Secret not found: {key} (env: {env_var})"
                )))
            },
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Secret contains invalid UTF-8: {env_var}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        let env_var = self.key_to_env_var(key);
        Ok(env::var(&env_var).is_ok())
    }

    async fn is_healthy(&self) -> bool {
        // Environment variables are always accessible
        true
    }
}

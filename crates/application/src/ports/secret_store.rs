//! Port for secret storage and retrieval
//!
//! Defines the interface for reading configured secrets (API keys) from a
//! backend such as process environment variables.

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for secret storage operations
///
/// Implementations can retrieve secrets from various backends:
/// - Environment variables (for local development and containers)
/// - External secret managers
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key
    ///
    /// # Arguments
    /// * `key` - The key of the secret (e.g., "google_api_key")
    ///
    /// # Returns
    /// The secret value as a string, or `ApplicationError::NotFound` if the
    /// key is not present in the backend.
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;

    /// Check if a secret exists
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError>;

    /// Check if the secret store is healthy and accessible
    async fn is_healthy(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::collections::HashMap;

    /// Mock secret store for testing
    #[derive(Debug, Default)]
    pub(crate) struct MockSecretStore {
        secrets: RwLock<HashMap<String, String>>,
    }

    impl MockSecretStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn set_secret(&self, key: impl Into<String>, value: impl Into<String>) {
            self.secrets.write().insert(key.into(), value.into());
        }
    }

    #[async_trait]
    impl SecretStorePort for MockSecretStore {
        async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
            self.secrets
                .read()
                .get(key)
                .cloned()
                .ok_or_else(|| ApplicationError::NotFound(format!("Secret not found: {key}")))
        }

        async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
            Ok(self.secrets.read().contains_key(key))
        }

        async fn is_healthy(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn mock_store_get_secret() {
        let store = MockSecretStore::new();
        store.set_secret("google_api_key", "secret_value");

        let result = store.get_secret("google_api_key").await.unwrap();
        assert_eq!(result, "secret_value");
    }

    #[tokio::test]
    async fn mock_store_secret_not_found() {
        let store = MockSecretStore::new();

        let result = store.get_secret("nonexistent").await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn mock_store_exists() {
        let store = MockSecretStore::new();
        store.set_secret("present", "value");

        assert!(store.exists("present").await.unwrap());
        assert!(!store.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn mock_store_is_healthy() {
        let store = MockSecretStore::new();
        assert!(store.is_healthy().await);
    }
}

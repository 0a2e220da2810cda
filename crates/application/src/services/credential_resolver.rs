//! Credential resolution
//!
//! Decides which API key to use for each external provider: a non-empty
//! per-request override wins, otherwise the configured default from the
//! secret store, otherwise Absent. Absent is not itself an error; callers
//! refuse to invoke the adapter and report the missing configuration
//! distinctly from remote failures.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::SecretStorePort;

/// External providers that take a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// The generative text/vision endpoint
    Google,
    /// The premium speech-synthesis endpoint
    ElevenLabs,
}

impl Provider {
    /// Secret-store key holding the configured default for this provider
    #[must_use]
    pub const fn secret_key(&self) -> &'static str {
        match self {
            Self::Google => "google_api_key",
            Self::ElevenLabs => "elevenlabs_api_key",
        }
    }

    /// Environment variable named in operator-facing messages
    #[must_use]
    pub const fn env_var(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE_API_KEY",
            Self::ElevenLabs => "ELEVENLABS_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::ElevenLabs => write!(f, "elevenlabs"),
        }
    }
}

/// A resolved, non-empty secret
///
/// The value never appears in Debug output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret value (trimmed)
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Expose the secret for use in a request header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Outcome of credential resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A non-empty override supplied with the request
    Override(Credential),
    /// The configured default from the secret store
    Configured(Credential),
    /// No override and no configured default
    Absent,
}

impl Resolution {
    /// The resolved credential, if any
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Override(c) | Self::Configured(c) => Some(c),
            Self::Absent => None,
        }
    }

    /// Whether resolution produced no credential
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Resolves provider credentials from overrides and the secret store
pub struct CredentialResolver {
    secrets: Arc<dyn SecretStorePort>,
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver").finish_non_exhaustive()
    }
}

impl CredentialResolver {
    /// Create a new resolver backed by the given secret store
    pub fn new(secrets: Arc<dyn SecretStorePort>) -> Self {
        Self { secrets }
    }

    /// Resolve the credential for a provider
    ///
    /// A non-empty override takes precedence over any configured default,
    /// letting a caller swap a rate-limited or expired key without
    /// redeploying. The key is never validated against the remote service.
    #[instrument(skip(self, override_key), fields(provider = %provider, has_override = override_key.is_some()))]
    pub async fn resolve(
        &self,
        provider: Provider,
        override_key: Option<&str>,
    ) -> Result<Resolution, ApplicationError> {
        if let Some(supplied) = override_key {
            if !supplied.trim().is_empty() {
                debug!("Using inline credential override");
                return Ok(Resolution::Override(Credential::new(supplied)));
            }
        }

        match self.secrets.get_secret(provider.secret_key()).await {
            Ok(value) if !value.trim().is_empty() => {
                debug!("Using configured credential");
                Ok(Resolution::Configured(Credential::new(value)))
            },
            Ok(_) => Ok(Resolution::Absent),
            Err(ApplicationError::NotFound(_)) => Ok(Resolution::Absent),
            Err(e) => Err(e),
        }
    }

    /// Resolve, converting Absent into a configuration-missing failure
    ///
    /// Used by callers that must refuse to invoke an adapter without a
    /// credential and report it distinctly from a remote failure.
    pub async fn require(
        &self,
        provider: Provider,
        override_key: Option<&str>,
    ) -> Result<Credential, ApplicationError> {
        match self.resolve(provider, override_key).await? {
            Resolution::Override(c) | Resolution::Configured(c) => Ok(c),
            Resolution::Absent => Err(ApplicationError::ConfigurationMissing(format!(
                "No API key available for {provider}; set {} or supply a key with the request",
                provider.env_var()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::secret_store::tests::MockSecretStore;

    fn resolver_with(store: MockSecretStore) -> CredentialResolver {
        CredentialResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn override_wins_over_configured_default() {
        let store = MockSecretStore::new();
        store.set_secret("google_api_key", "configured-key");
        let resolver = resolver_with(store);

        let resolution = resolver
            .resolve(Provider::Google, Some("override-key"))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Override(Credential::new("override-key"))
        );
    }

    #[tokio::test]
    async fn falls_back_to_configured_default() {
        let store = MockSecretStore::new();
        store.set_secret("google_api_key", "configured-key");
        let resolver = resolver_with(store);

        let resolution = resolver.resolve(Provider::Google, None).await.unwrap();

        assert_eq!(
            resolution,
            Resolution::Configured(Credential::new("configured-key"))
        );
    }

    #[tokio::test]
    async fn empty_override_falls_back_to_default() {
        let store = MockSecretStore::new();
        store.set_secret("google_api_key", "configured-key");
        let resolver = resolver_with(store);

        for blank in ["", "   ", "\t"] {
            let resolution = resolver
                .resolve(Provider::Google, Some(blank))
                .await
                .unwrap();
            assert_eq!(
                resolution,
                Resolution::Configured(Credential::new("configured-key")),
                "blank override {blank:?} should not win"
            );
        }
    }

    #[tokio::test]
    async fn absent_when_nothing_available() {
        let resolver = resolver_with(MockSecretStore::new());

        let resolution = resolver.resolve(Provider::Google, None).await.unwrap();

        assert!(resolution.is_absent());
        assert!(resolution.credential().is_none());
    }

    #[tokio::test]
    async fn blank_configured_value_is_absent() {
        let store = MockSecretStore::new();
        store.set_secret("elevenlabs_api_key", "   ");
        let resolver = resolver_with(store);

        let resolution = resolver
            .resolve(Provider::ElevenLabs, None)
            .await
            .unwrap();

        assert!(resolution.is_absent());
    }

    #[tokio::test]
    async fn override_works_without_configured_default() {
        let resolver = resolver_with(MockSecretStore::new());

        let resolution = resolver
            .resolve(Provider::ElevenLabs, Some("inline-key"))
            .await
            .unwrap();

        assert_eq!(
            resolution.credential().map(Credential::expose),
            Some("inline-key")
        );
    }

    #[tokio::test]
    async fn require_converts_absent_into_configuration_missing() {
        let resolver = resolver_with(MockSecretStore::new());

        let result = resolver.require(Provider::Google, None).await;

        let Err(ApplicationError::ConfigurationMissing(msg)) = result else {
            unreachable!("Expected ConfigurationMissing");
        };
        assert!(msg.contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn require_returns_credential_when_available() {
        let store = MockSecretStore::new();
        store.set_secret("google_api_key", "the-key");
        let resolver = resolver_with(store);

        let credential = resolver.require(Provider::Google, None).await.unwrap();
        assert_eq!(credential.expose(), "the-key");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("very-secret-value");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("very-secret-value"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn credential_is_trimmed() {
        let credential = Credential::new("  key  ");
        assert_eq!(credential.expose(), "key");
    }

    #[test]
    fn provider_secret_keys() {
        assert_eq!(Provider::Google.secret_key(), "google_api_key");
        assert_eq!(Provider::ElevenLabs.secret_key(), "elevenlabs_api_key");
        assert_eq!(Provider::Google.env_var(), "GOOGLE_API_KEY");
        assert_eq!(Provider::ElevenLabs.env_var(), "ELEVENLABS_API_KEY");
    }
}

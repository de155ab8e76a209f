// Persistent bearer-token storage.
//
// The client reads the token on every request, so whatever the store
// holds at send time is what goes on the wire.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use thiserror::Error;

/// Fixed key the token is persisted under.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// A token store backend failed to read or write.
#[derive(Debug, Error)]
#[error("token storage failed: {0}")]
pub struct TokenStoreError(pub String);

/// Client-side persistent storage for the auth token.
///
/// Implementations: [`MemoryTokenStore`] here, file and keyring backends in
/// `fleetdesk-config`.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Read the stored token, if any.
    fn load(&self) -> Option<SecretString>;

    /// Persist a token, replacing any previous one.
    fn save(&self, token: &SecretString) -> Result<(), TokenStoreError>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Process-local token store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: ArcSwapOption<SecretString>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .token
            .store(Some(Arc::new(SecretString::from(token.into()))));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<SecretString> {
        self.token.load_full().map(|t| (*t).clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        self.token.store(Some(Arc::new(token.clone())));
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.token.store(None);
        Ok(())
    }
}

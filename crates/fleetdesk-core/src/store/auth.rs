// ── Auth store ──
//
// Holds the session token and the signed-in user. The token is shared
// with the HTTP client through the persistent `TokenStore`, so whatever
// this store saves is what the next request carries.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use fleetdesk_api::types::{LoginResponse, User};
use fleetdesk_api::{ApiClient, LoginCredentials, TokenStore};

use super::list::Busy;
use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: Arc<ApiClient>,
    token: watch::Sender<Option<SecretString>>,
    user: watch::Sender<Option<User>>,
    loading: watch::Sender<bool>,
}

impl AuthStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (token, _) = watch::channel(None);
        let (user, _) = watch::channel(None);
        let (loading, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                api,
                token,
                user,
                loading,
            }),
        }
    }

    fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.inner.api.token_store()
    }

    // ── Readers ──────────────────────────────────────────────────────

    /// `true` iff a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.borrow().is_some()
    }

    pub fn token(&self) -> Option<SecretString> {
        self.inner.token.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.user.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.loading.borrow()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.inner.user.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Restore a persisted session. When a token is stored the profile is
    /// fetched; if that fails the session is dropped.
    pub async fn initialize(&self) {
        let Some(stored) = self.tokens().load() else {
            debug!("no stored session");
            return;
        };
        self.inner.token.send_replace(Some(stored));

        let _busy = Busy::start(&self.inner.loading);
        if let Some(profile) = self.fetch_profile().await {
            self.inner.user.send_replace(Some(profile));
        }
    }

    /// Fetch the signed-in user's profile. Any failure logs out.
    pub async fn fetch_profile(&self) -> Option<User> {
        match self.inner.api.get_profile().await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "failed to fetch profile, logging out");
                self.logout();
                None
            }
        }
    }

    /// Exchange credentials for a token and persist it. Errors from the
    /// server are returned as-is; nothing is retried or notified.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, CoreError> {
        let _busy = Busy::start(&self.inner.loading);
        let response = self.inner.api.login(credentials).await?;

        if !response.access_token.is_empty() {
            let token = SecretString::from(response.access_token.clone());
            self.tokens().save(&token)?;
            self.inner.token.send_replace(Some(token));
            if let Some(user) = &response.user {
                self.inner.user.send_replace(Some(user.clone()));
            }
            info!(email = %credentials.email, "signed in");
        }

        Ok(response)
    }

    /// Forget the token and user and remove the persisted token.
    pub fn logout(&self) {
        self.inner.token.send_replace(None);
        self.inner.user.send_replace(None);
        if let Err(e) = self.tokens().clear() {
            warn!(error = %e, "failed to remove stored token");
        }
        info!("signed out");
    }
}

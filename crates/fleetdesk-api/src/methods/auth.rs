// Auth endpoints
//
// Login is the only unauthenticated call; the rest rely on the bearer
// token the client stamps on every request.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{LoginResponse, User};

/// Email + password pair for `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl ApiClient {
    /// Exchange credentials for an access token and the user profile.
    ///
    /// `POST /auth/login`
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, Error> {
        debug!(email = %credentials.email, "logging in");
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });
        self.post("/auth/login", Some(&body), None).await
    }

    /// `GET /auth/profile`
    pub async fn get_profile(&self) -> Result<User, Error> {
        self.get("/auth/profile", None).await
    }

    /// Trade the current token for a fresh one.
    ///
    /// `POST /auth/refresh`
    pub async fn refresh_token(&self) -> Result<LoginResponse, Error> {
        debug!("refreshing access token");
        self.post::<_, ()>("/auth/refresh", None, None).await
    }

    /// Invalidate the session server-side.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let _: Option<serde_json::Value> = self.post::<_, ()>("/auth/logout", None, None).await?;
        Ok(())
    }
}

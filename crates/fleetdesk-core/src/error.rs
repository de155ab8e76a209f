// ── Core error types ──
//
// User-facing errors from fleetdesk-core. The `From<fleetdesk_api::Error>`
// impl translates transport-layer errors into domain variants while keeping
// the server's message and HTTP status.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the fleetdesk API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unknown route: {path}")]
    UnknownRoute { path: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Token storage error: {message}")]
    TokenStorage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status behind this error, when it came from a server answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { .. } => Some(401),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fleetdesk_api::Error> for CoreError {
    fn from(err: fleetdesk_api::Error) -> Self {
        let server_message = err.server_message().map(str::to_owned);
        match err {
            fleetdesk_api::Error::Api { status: 401, .. } => CoreError::AuthenticationFailed {
                message: server_message.unwrap_or_else(|| "invalid or expired token".into()),
            },
            fleetdesk_api::Error::Api { status: 404, .. } => CoreError::NotFound {
                message: server_message.unwrap_or_else(|| "resource does not exist".into()),
            },
            fleetdesk_api::Error::Api { status, .. } => CoreError::Api {
                message: server_message.unwrap_or_else(|| format!("HTTP {status}")),
                status: Some(status),
            },
            fleetdesk_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fleetdesk_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            fleetdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fleetdesk_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot be used for API requests: {url}"),
            },
            fleetdesk_api::Error::InvalidHeader(msg) => CoreError::TokenStorage {
                message: format!("stored token is not a valid header value: {msg}"),
            },
            fleetdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from server: {message}"))
            }
        }
    }
}

impl From<fleetdesk_api::TokenStoreError> for CoreError {
    fn from(err: fleetdesk_api::TokenStoreError) -> Self {
        CoreError::TokenStorage { message: err.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: Option<&str>) -> fleetdesk_api::Error {
        fleetdesk_api::Error::Api {
            status,
            message: message.map(str::to_owned),
            body: String::new(),
        }
    }

    #[test]
    fn keeps_server_message_and_status() {
        let err = CoreError::from(api(422, Some("plateNumber already exists")));
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "API error: plateNumber already exists");
    }

    #[test]
    fn maps_401_and_404() {
        assert!(matches!(
            CoreError::from(api(401, None)),
            CoreError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            CoreError::from(api(404, Some("Order not found"))),
            CoreError::NotFound { message } if message == "Order not found"
        ));
    }

    #[test]
    fn falls_back_to_status_without_message() {
        let err = CoreError::from(api(500, None));
        assert_eq!(err.to_string(), "API error: HTTP 500");
    }

    #[test]
    fn timeout_reports_the_configured_seconds() {
        let err = CoreError::from(fleetdesk_api::Error::Timeout { timeout_secs: 10 });
        assert_eq!(err.to_string(), "Request timed out after 10s");
        assert!(err.status().is_none());
    }
}

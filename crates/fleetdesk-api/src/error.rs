use thiserror::Error;

/// Top-level error type for the `fleetdesk-api` crate.
///
/// Covers every failure mode of the REST adapter: transport, HTTP error
/// statuses (with the server's message when one was sent) and body
/// decoding. `fleetdesk-core` wraps these for store consumers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// A header value could not be encoded (bad token characters, etc.)
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the server-provided `message` field
    /// when the body had one.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The message the server put in its error payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a 401 response (missing, expired or revoked token).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never got an answer from the server.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_ignores_blank_messages() {
        let err = Error::Api {
            status: 400,
            message: Some("  ".into()),
            body: String::new(),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn unauthorized_is_detected_from_status() {
        let err = Error::Api {
            status: 401,
            message: Some("Unauthorized".into()),
            body: String::new(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
        assert!(!err.is_transient());
    }

    #[test]
    fn display_falls_back_when_message_missing() {
        let err = Error::Api {
            status: 500,
            message: None,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): no message");
    }
}

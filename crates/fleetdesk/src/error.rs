//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use fleetdesk_config::ConfigError;
use fleetdesk_core::CoreError;
use fleetdesk_core::validation::ValidationErrors;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(fleetdesk::connection_failed),
        help(
            "Check that the backend is running.\n\
             Reason: {reason}\n\
             Change the URL with: fleetdesk config set api_url <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(fleetdesk::timeout),
        help("Increase the timeout with --timeout or: fleetdesk config set timeout <SECS>")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(code(fleetdesk::auth_failed), help("Sign in again with: fleetdesk auth login"))]
    AuthFailed { message: String },

    #[error("Not signed in")]
    #[diagnostic(code(fleetdesk::not_signed_in), help("Sign in with: fleetdesk auth login"))]
    NotSignedIn,

    #[error("Could not store the session token: {message}")]
    #[diagnostic(
        code(fleetdesk::token_storage),
        help("Pick another backend with: fleetdesk config set token_storage file|keyring|memory")
    )]
    TokenStorage { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fleetdesk::not_found),
        help("Run: fleetdesk {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Not found: {message}")]
    #[diagnostic(code(fleetdesk::not_found))]
    Missing { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(fleetdesk::api_error))]
    ApiError { message: String, status: Option<u16> },

    /// The failure was already reported as a notification.
    #[error("{action} failed")]
    #[diagnostic(code(fleetdesk::failed))]
    Failed { action: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fleetdesk::validation))]
    Validation { field: String, reason: String },

    #[error("{errors}")]
    #[diagnostic(
        code(fleetdesk::invalid_form),
        help("Check these fields: {fields}")
    )]
    InvalidForm {
        errors: ValidationErrors,
        fields: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(fleetdesk::config),
        help("Inspect the configuration with: fleetdesk config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(fleetdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotSignedIn => exit_code::AUTH,
            Self::NotFound { .. } | Self::Missing { .. } => exit_code::NOT_FOUND,
            Self::ApiError {
                status: Some(401), ..
            } => exit_code::AUTH,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidForm { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Config(ConfigError::Validation { .. } | ConfigError::UnknownKey { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NotFound { message } => Self::Missing { message },
            CoreError::UnknownRoute { path } => Self::Validation {
                field: "route".into(),
                reason: format!("no view at {path}"),
            },
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::TokenStorage { message } => Self::TokenStorage { message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<ValidationErrors> for CliError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.fields().collect::<Vec<_>>().join(", ");
        Self::InvalidForm { errors, fields }
    }
}

impl From<fleetdesk_core::ApiError> for CliError {
    fn from(err: fleetdesk_core::ApiError) -> Self {
        CoreError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_failure_kind() {
        assert_eq!(CliError::NotSignedIn.exit_code(), exit_code::AUTH);
        let bad_key = CliError::Config(ConfigError::UnknownKey { key: "colour".into() });
        assert_eq!(bad_key.exit_code(), exit_code::USAGE);
        let missing = CliError::ApiError {
            message: "Order not found".into(),
            status: Some(404),
        };
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);
        let failed = CliError::Failed {
            action: "delete truck".into(),
        };
        assert_eq!(failed.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn timeout_keeps_its_seconds() {
        let err = CliError::from(CoreError::Timeout { timeout_secs: 10 });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }
}

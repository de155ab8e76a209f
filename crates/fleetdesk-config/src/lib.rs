//! Shared configuration for the fleetdesk console.
//!
//! Layered TOML config (defaults, then the config file, then `FLEETDESK_*`
//! environment variables) and the persistent token stores the API client
//! reads its bearer token from.

mod token;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use fleetdesk_api::{DEFAULT_BASE_URL, MemoryTokenStore, TokenStore, TransportConfig};

pub use token::{FileTokenStore, KEYRING_SERVICE, KeyringTokenStore};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "FLEETDESK_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown config key '{key}'")]
    UnknownKey { key: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Where the auth token is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    /// Plain file under the platform data directory.
    #[default]
    File,
    /// System keyring.
    Keyring,
    /// Nothing persisted; every run starts signed out.
    Memory,
}

impl std::str::FromStr for TokenStorage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Validation {
                field: "token_storage".into(),
                reason: format!("expected 'file', 'keyring' or 'memory', got '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for TokenStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Keyring => "keyring",
            Self::Memory => "memory",
        })
    }
}

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL, e.g. "http://localhost:3000/api".
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Rows per page for list commands.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Default output format for the CLI.
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub token_storage: TokenStorage,

    /// Directory for the token file (platform data dir when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            insecure: false,
            page_size: default_page_size(),
            output: default_output(),
            token_storage: TokenStorage::default(),
            token_dir: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_page_size() -> u32 {
    10
}
fn default_output() -> String {
    "table".into()
}

impl Config {
    /// Keys accepted by [`Config::set`] and [`Config::get`].
    pub const KEYS: &'static [&'static str] = &[
        "api_url",
        "timeout",
        "insecure",
        "page_size",
        "output",
        "token_storage",
        "token_dir",
    ];

    /// Check the values a running console depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.api_url) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => {
                return Err(ConfigError::Validation {
                    field: "api_url".into(),
                    reason: format!("not a valid base URL: {}", self.api_url),
                });
            }
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Validation {
                field: "page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Read a single key as a display string.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "api_url" => self.api_url.clone(),
            "timeout" => self.timeout.to_string(),
            "insecure" => self.insecure.to_string(),
            "page_size" => self.page_size.to_string(),
            "output" => self.output.clone(),
            "token_storage" => self.token_storage.to_string(),
            "token_dir" => self
                .token_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            other => return Err(unknown(other)),
        })
    }

    /// Set a single key from its string form, then re-validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_url" => value.clone_into(&mut self.api_url),
            "timeout" => self.timeout = parse_field(key, value)?,
            "insecure" => self.insecure = parse_field(key, value)?,
            "page_size" => self.page_size = parse_field(key, value)?,
            "output" => value.clone_into(&mut self.output),
            "token_storage" => self.token_storage = value.parse()?,
            "token_dir" => {
                self.token_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            other => return Err(unknown(other)),
        }
        self.validate()
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout),
            accept_invalid_certs: self.insecure,
        }
    }

    /// Open the token store selected by `token_storage`.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        match self.token_storage {
            TokenStorage::File => {
                let dir = self.token_dir.clone().unwrap_or_else(data_dir);
                Arc::new(FileTokenStore::in_dir(&dir))
            }
            TokenStorage::Keyring => Arc::new(KeyringTokenStore::new()),
            TokenStorage::Memory => Arc::new(MemoryTokenStore::new()),
        }
    }
}

fn unknown(key: &str) -> ConfigError {
    ConfigError::UnknownKey { key: key.into() }
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "fleetdesk", "fleetdesk")
}

/// Resolve the config file path: `FLEETDESK_CONFIG`, then the platform
/// config dir.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Platform data directory, home for the token file.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn home_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("fleetdesk");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if present), then `FLEETDESK_*` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLEETDESK_"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize to TOML at the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

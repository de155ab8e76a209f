// fleetdesk-api: Async Rust client for the fleetdesk logistics REST API

pub mod client;
pub mod error;
pub mod methods;
pub mod token;
pub mod transport;
pub mod types;

pub use client::{ApiClient, RequestConfig};
pub use error::Error;
pub use methods::LoginCredentials;
pub use token::{AUTH_TOKEN_KEY, MemoryTokenStore, TokenStore, TokenStoreError};
pub use transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TransportConfig};

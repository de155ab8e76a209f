// Hand-crafted async HTTP adapter for the fleetdesk REST API.
//
// Base path: configurable, `http://localhost:3000/api` by default
// Auth: `Authorization: Bearer <token>` from the injected TokenStore

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::token::TokenStore;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

/// Backends answer errors with `{"message": "..."}`; validation failures
/// send `{"message": ["field a ...", "field b ..."]}` instead.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_text(self) -> String {
        match self {
            Self::One(m) => m,
            Self::Many(ms) => ms.join("; "),
        }
    }
}

// ── Per-call configuration ───────────────────────────────────────────

/// Optional per-request settings layered on top of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query pairs appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Extra headers. Applied after the auth header, so they can override it.
    pub headers: HeaderMap,
    /// Replaces the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// A config that only carries query pairs.
    pub fn with_query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the fleetdesk REST API.
///
/// Stamps every request with the bearer token currently held by the
/// [`TokenStore`], decodes JSON responses and turns non-2xx answers into
/// [`Error::Api`] carrying the server's message. No retries and no response
/// interceptors: a 401 is returned to the caller like any other failure.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: ArcSwap<Url>,
    timeout: Duration,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL, transport config and token store.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::parse_base_url(base_url)?;
        Ok(Self {
            http,
            base_url: ArcSwap::from_pointee(base_url),
            timeout: transport.timeout,
            tokens,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport settings).
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, Error> {
        let base_url = Self::parse_base_url(base_url)?;
        Ok(Self {
            http,
            base_url: ArcSwap::from_pointee(base_url),
            timeout: crate::transport::DEFAULT_TIMEOUT,
            tokens,
        })
    }

    fn parse_base_url(raw: &str) -> Result<Url, Error> {
        let url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(raw.to_owned()));
        }
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The base URL requests are currently sent to.
    pub fn base_url(&self) -> Arc<Url> {
        self.base_url.load_full()
    }

    /// Point all subsequent requests at a different backend.
    ///
    /// In-flight requests keep the URL they were built with.
    pub fn set_base_url(&self, raw: &str) -> Result<(), Error> {
        let url = Self::parse_base_url(raw)?;
        debug!(base_url = %url, "base URL changed");
        self.base_url.store(Arc::new(url));
        Ok(())
    }

    /// The token store consulted on every request.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `path` (e.g. `"/orders/abc/trips"`) to the base URL.
    ///
    /// Each `/`-separated piece is pushed as its own segment, so ids are
    /// percent-encoded.
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        let mut url = Url::clone(&self.base_url.load_full());
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(url_string(&self.base_url.load_full())))?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        self.send::<T, ()>(Method::GET, path, None, config).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        self.send(Method::POST, path, body, config).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        self.send(Method::PUT, path, body, config).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        self.send(Method::PATCH, path, body, config).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        self.send::<T, ()>(Method::DELETE, path, None, config).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Result<T, Error> {
        let empty = RequestConfig::default();
        let config = config.unwrap_or(&empty);
        let url = self.url(path, &config.query)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);

        if let Some(token) = self.tokens.load() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        if !config.headers.is_empty() {
            builder = builder.headers(config.headers.clone());
        }

        let timeout = config.timeout.unwrap_or(self.timeout);
        if config.timeout.is_some() {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Self::transport_error(e, timeout))?;

        Self::handle_response(resp, timeout).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// A timeout while sending or while reading the body reports the
    /// timeout that was in force for the request.
    fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        timeout: Duration,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Self::transport_error(e, timeout))?;
        trace!(%status, len = body.len(), "response received");

        if !status.is_success() {
            return Err(Self::parse_error(status, body));
        }

        // DELETE and some PATCH endpoints answer with an empty body.
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(|e| {
            let preview = &body[..floor_char_boundary(&body, 200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    fn parse_error(status: reqwest::StatusCode, raw: String) -> Error {
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .map(ErrorMessage::into_text);

        Error::Api {
            status: status.as_u16(),
            message,
            body: raw,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &url_string(&self.base_url.load_full()))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn url_string(url: &Url) -> String {
    url.as_str().to_owned()
}

/// Largest char boundary at or below `max`, for safe previews.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(
            reqwest::Client::new(),
            base,
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn url_appends_segments_to_base_path() {
        let c = client("http://localhost:3000/api");
        let url = c.url("/orders/abc/trips", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/orders/abc/trips");
    }

    #[test]
    fn url_handles_trailing_slash_base() {
        let c = client("http://localhost:3000/api/");
        let url = c.url("/trucks", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/trucks");
    }

    #[test]
    fn url_encodes_query_pairs_in_order() {
        let c = client("http://localhost:3000/api");
        let url = c
            .url(
                "/orders",
                &[("page".into(), "2".into()), ("pageSize".into(), "5".into())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/orders?page=2&pageSize=5"
        );
    }

    #[test]
    fn url_percent_encodes_ids() {
        let c = client("http://localhost:3000/api");
        let url = c.url("/addresses/a b", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/addresses/a%20b");
    }

    #[test]
    fn set_base_url_rejects_garbage() {
        let c = client("http://localhost:3000/api");
        assert!(c.set_base_url("not a url").is_err());
        assert!(c.set_base_url("mailto:ops@example.com").is_err());
        assert_eq!(c.base_url().as_str(), "http://localhost:3000/api");
    }

    #[test]
    fn parse_error_joins_validation_messages() {
        let err = ApiClient::parse_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message":["width must be numeric","plateNumber is required"]}"#.into(),
        );
        assert_eq!(
            err.server_message(),
            Some("width must be numeric; plateNumber is required")
        );
    }

    #[test]
    fn parse_error_without_json_has_no_message() {
        let err = ApiClient::parse_error(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>".into(),
        );
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let s = "é".repeat(150);
        let idx = floor_char_boundary(&s, 201);
        assert!(s.is_char_boundary(idx));
        assert!(idx <= 201);
    }
}

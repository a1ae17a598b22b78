//! HTTP access to the entitlement backend.
//!
//! The engine makes exactly one kind of request: a JSON GET against its own
//! backend. [`HttpClient`] wraps `reqwest` with a per-request timeout, an
//! optional host allowlist, and status checking.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::HttpError;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("AdRelay/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// JSON-over-HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_hosts: Vec<String>,
}

impl HttpClient {
    /// Default request timeout, matching the premium check budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

    /// Creates a client with [`DEFAULT_TIMEOUT`](Self::DEFAULT_TIMEOUT).
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|error| {
                warn!(%error, "Falling back to a default HTTP client");
                Client::new()
            });

        Self {
            inner,
            allowed_hosts: Vec::new(),
        }
    }

    /// Only lets requests through to `host` and its subdomains.
    ///
    /// Can be called repeatedly. With no hosts added every host is allowed.
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.push(host.into().to_ascii_lowercase());
        self
    }

    fn permits(&self, url: &Url) -> Result<(), HttpError> {
        if self.allowed_hosts.is_empty() {
            return Ok(());
        }
        let host = url
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl(format!("{url}: no host")))?;

        let subdomain_of = |allowed: &String| {
            host.strip_suffix(allowed.as_str())
                .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('.'))
        };
        if self.allowed_hosts.iter().any(subdomain_of) {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// GETs `url` and decodes its JSON body. A non-2xx status is an error.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, HttpError> {
        self.permits(url)?;

        let response = self.inner.get(url.clone()).send().await?;
        let status = response.status();
        debug!(%status, "Response received");
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

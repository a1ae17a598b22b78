//! Premium ("ad-free") entitlement checks.
//!
//! [`PremiumChecker`] asks the backend whether the current user is premium.
//! Concurrent checks for the same user share one request, and every failure
//! resolves to [`PremiumStatus::check_failed`] so ads keep being shown.

use adrelay_core::{PremiumResponse, PremiumStatus};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::context::HostContext;
use crate::error::{FetchError, HttpError};
use crate::host::http::HttpClient;
use crate::single_flight::SingleFlight;

/// Reason reported when no user id is configured.
const NO_USER_REASON: &str = "No user id";

// ============================================================================
// Entitlement API
// ============================================================================

/// Remote source of premium status.
#[async_trait]
pub trait EntitlementApi: Send + Sync {
    /// Fetches the premium status of `user_id`.
    async fn fetch_status(&self, user_id: &str) -> Result<PremiumStatus, FetchError>;
}

/// Entitlement API backed by `GET {base}/premium-status/{userId}`.
pub struct HttpEntitlementApi {
    http: Arc<HttpClient>,
    base_url: Url,
}

impl HttpEntitlementApi {
    /// Creates an API client rooted at `base_url`.
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(base_url.to_string()).into());
        }
        Ok(Self { http, base_url })
    }

    /// Builds the status URL for `user_id`, percent-encoding the id.
    pub fn status_url(&self, user_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("premium-status").push(user_id);
        }
        url
    }
}

#[async_trait]
impl EntitlementApi for HttpEntitlementApi {
    async fn fetch_status(&self, user_id: &str) -> Result<PremiumStatus, FetchError> {
        let url = self.status_url(user_id);
        let body: PremiumResponse = self.http.get_json(&url).await?;
        body.into_status().ok_or_else(|| {
            FetchError::InvalidResponse("backend reported success=false".to_string())
        })
    }
}

// ============================================================================
// Premium Checker
// ============================================================================

/// Fail-closed, single-flight premium status check.
///
/// There is no cache: once a check settles, the next call performs a fresh
/// request.
pub struct PremiumChecker {
    api: Arc<dyn EntitlementApi>,
    user_id: Option<String>,
    timeout: Duration,
    flights: SingleFlight<String, Arc<PremiumStatus>>,
}

impl PremiumChecker {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

    /// Creates a checker for `user_id` using `api`.
    pub fn new(api: Arc<dyn EntitlementApi>, user_id: Option<String>) -> Self {
        Self {
            api,
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            timeout: Self::DEFAULT_TIMEOUT,
            flights: SingleFlight::new(),
        }
    }

    /// Creates a checker talking HTTP to the backend configured in `ctx`.
    pub fn from_context(ctx: &HostContext, user_id: Option<String>) -> Result<Self, FetchError> {
        let base = ctx
            .settings
            .api_base_url
            .as_deref()
            .ok_or_else(|| FetchError::NotConfigured("api_base_url".to_string()))?;
        let api = HttpEntitlementApi::new(Arc::clone(&ctx.http), base)?;
        Ok(Self::new(Arc::new(api), user_id).with_timeout(ctx.settings.premium_timeout))
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The user this checker asks about.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns true while a check is in flight.
    pub fn is_checking(&self) -> bool {
        self.user_id
            .as_ref()
            .is_some_and(|id| self.flights.is_in_flight(id))
    }

    /// Returns the user's premium status. Never fails.
    ///
    /// Concurrent callers share one request and receive the same `Arc`.
    #[instrument(skip(self), fields(user = ?self.user_id))]
    pub async fn check_status(&self) -> Arc<PremiumStatus> {
        let Some(user_id) = self.user_id.clone() else {
            debug!("No user id, skipping premium check");
            return Arc::new(PremiumStatus::none(NO_USER_REASON));
        };

        let api = Arc::clone(&self.api);
        let timeout = self.timeout;
        let key = user_id.clone();
        self.flights
            .run(key, move || async move {
                Arc::new(fetch_fail_closed(api.as_ref(), &user_id, timeout).await)
            })
            .await
    }
}

async fn fetch_fail_closed(
    api: &dyn EntitlementApi,
    user_id: &str,
    timeout: Duration,
) -> PremiumStatus {
    match tokio::time::timeout(timeout, api.fetch_status(user_id)).await {
        Ok(Ok(status)) => {
            info!(has_premium = status.has_premium, reason = %status.reason, "Premium status fetched");
            status
        }
        Ok(Err(error)) => {
            warn!(error = %error, "Premium check failed, assuming no premium");
            PremiumStatus::check_failed()
        }
        Err(_) => {
            warn!(timeout = ?timeout, "Premium check timed out, assuming no premium");
            PremiumStatus::check_failed()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

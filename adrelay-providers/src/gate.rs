//! Premium gate: entitlement check in front of the registry.

use adrelay_core::{AdResult, PremiumStatus};
use adrelay_fetch::PremiumChecker;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::registry::ProviderRegistry;

/// Skips ads for premium users and tags every other result with the
/// status it was decided on.
pub struct PremiumGate {
    checker: PremiumChecker,
    registry: ProviderRegistry,
}

impl PremiumGate {
    /// Creates a gate.
    pub fn new(checker: PremiumChecker, registry: ProviderRegistry) -> Self {
        Self { checker, registry }
    }

    /// The guarded registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The entitlement checker.
    pub fn checker(&self) -> &PremiumChecker {
        &self.checker
    }

    /// Current premium status. Never fails; see [`PremiumChecker`].
    pub async fn check_status(&self) -> Arc<PremiumStatus> {
        self.checker.check_status().await
    }

    /// Checks entitlement, then shows an ad unless the user is premium.
    ///
    /// The check always settles before any provider is touched.
    pub async fn show_rewarded_ad(&self) -> AdResult {
        self.show_rewarded_ad_after(async {}).await
    }

    /// Like [`show_rewarded_ad`](Self::show_rewarded_ad), but awaits
    /// `prepare` between the entitlement check and provider resolution.
    ///
    /// `prepare` is never polled for premium users.
    #[instrument(skip_all)]
    pub async fn show_rewarded_ad_after<F>(&self, prepare: F) -> AdResult
    where
        F: Future<Output = ()>,
    {
        let status = self.check_status().await;
        if status.has_premium {
            info!(reason = %status.reason, "Premium user, skipping ad");
            return AdResult::premium_skip(PremiumStatus::clone(&status));
        }

        prepare.await;
        let provider = self.registry.resolve();
        info!(provider = provider.name(), "Showing rewarded ad");
        provider
            .show_rewarded_ad()
            .await
            .with_premium(PremiumStatus::clone(&status))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{default_creatives, CarouselProvider};
    use adrelay_fetch::{EntitlementApi, FetchError, HeadlessSurface, Viewport};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedApi(PremiumStatus);

    #[async_trait]
    impl EntitlementApi for FixedApi {
        async fn fetch_status(&self, _user_id: &str) -> Result<PremiumStatus, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn gate(status: PremiumStatus, viewport: Viewport) -> PremiumGate {
        let checker = PremiumChecker::new(Arc::new(FixedApi(status)), Some("5".to_string()));
        let carousel = CarouselProvider::new(
            default_creatives(),
            viewport,
            Arc::new(HeadlessSurface::new()),
            Vec::new(),
        );
        PremiumGate::new(checker, ProviderRegistry::builder(carousel).build())
    }

    #[tokio::test]
    async fn test_free_user_result_is_tagged() {
        let gate = gate(PremiumStatus::none("Expired"), Viewport::landscape());

        let result = gate.show_rewarded_ad().await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("orientation"));
        assert!(!result.skipped);
        assert_eq!(result.premium.map(|p| p.reason), Some("Expired".to_string()));
    }

    #[tokio::test]
    async fn test_prepare_skipped_for_premium() {
        let prepared = AtomicBool::new(false);
        let gate = gate(PremiumStatus::forever("Lifetime"), Viewport::portrait());

        let result = gate
            .show_rewarded_ad_after(async { prepared.store(true, Ordering::SeqCst) })
            .await;

        assert!(result.skipped);
        assert!(!prepared.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_prepare_runs_for_free_user() {
        let prepared = AtomicBool::new(false);
        let gate = gate(PremiumStatus::none("No premium"), Viewport::landscape());

        let result = gate
            .show_rewarded_ad_after(async { prepared.store(true, Ordering::SeqCst) })
            .await;

        assert!(!result.success);
        assert!(prepared.load(Ordering::SeqCst));
    }
}

//! Placeholder providers for networks that are not integrated yet.

use adrelay_core::{AdResult, ProviderInfo, ProviderKind, ProviderState};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::provider::{AdProvider, ProviderConfig};

const NOT_INTEGRATED: &str = "not integrated";

/// A provider that is never available.
///
/// Keeps its slot in the priority order so wiring up the real network only
/// swaps the implementation.
pub struct StubProvider {
    kind: ProviderKind,
    initialized: AtomicBool,
}

impl StubProvider {
    /// Creates a stub for `kind`.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            initialized: AtomicBool::new(false),
        }
    }

    /// Monetag placeholder.
    pub fn monetag() -> Self {
        Self::new(ProviderKind::Monetag)
    }

    /// RichAds placeholder.
    pub fn richads() -> Self {
        Self::new(ProviderKind::RichAds)
    }
}

#[async_trait]
impl AdProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn initialize(&self, _config: &ProviderConfig) -> bool {
        self.initialized.store(true, Ordering::Release);
        false
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn show_rewarded_ad(&self) -> AdResult {
        AdResult::failure(self.name(), format!("{} is {NOT_INTEGRATED}", self.kind.display_name()))
    }

    fn provider_info(&self) -> ProviderInfo {
        let state = if self.initialized.load(Ordering::Acquire) {
            ProviderState::Failed(NOT_INTEGRATED.to_string())
        } else {
            ProviderState::Uninitialized
        };
        ProviderInfo::new(self.kind, state, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_never_available() {
        let stub = StubProvider::monetag();
        assert!(!stub.is_available());
        assert!(!stub.initialize(&ProviderConfig::default()).await);
        assert!(!stub.is_available());

        let info = stub.provider_info();
        assert_eq!(info.state, ProviderState::Failed("not integrated".to_string()));

        let result = stub.show_rewarded_ad().await;
        assert!(!result.success);
        assert_eq!(result.provider, "monetag");
    }
}

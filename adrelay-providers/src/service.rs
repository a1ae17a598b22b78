//! The facade consumed by game screens.
//!
//! Every method resolves: callers branch only on [`AdResult::success`] and
//! [`AdResult::skipped`].

use adrelay_core::{AdResult, PremiumStatus, ProviderInfo};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::gate::PremiumGate;
use crate::provider::ProviderConfig;

/// Diagnostic snapshot of the whole service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Whether `initialize` has completed.
    pub initialized: bool,
    /// Whether any provider can show an ad right now.
    pub available: bool,
    /// Provider `show_rewarded_ad` would use now.
    pub active: ProviderInfo,
    /// All providers in priority order.
    pub providers: Vec<ProviderInfo>,
    /// User the premium check is made for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Rewarded-ad service.
pub struct AdService {
    gate: PremiumGate,
    default_config: ProviderConfig,
    init: OnceCell<usize>,
}

impl AdService {
    /// Creates a service. `default_config` is used when `show_rewarded_ad`
    /// runs before `initialize`.
    pub fn new(gate: PremiumGate, default_config: ProviderConfig) -> Self {
        Self {
            gate,
            default_config,
            init: OnceCell::new(),
        }
    }

    /// Initializes the providers once. Later calls are no-ops, whatever
    /// config they pass.
    ///
    /// Returns true if a provider can show an ad afterwards.
    #[instrument(skip_all)]
    pub async fn initialize(&self, config: Option<ProviderConfig>) -> bool {
        let ready = self
            .init
            .get_or_init(|| async {
                let config = config.unwrap_or_else(|| self.default_config.clone());
                self.gate.registry().initialize(&config).await
            })
            .await;
        debug!(ready, "Service initialized");
        self.is_available()
    }

    /// Returns true once `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.init.initialized()
    }

    /// Shows a rewarded ad.
    ///
    /// Providers are initialized with the default config on first use, after
    /// the entitlement check and only when an ad will actually be shown.
    pub async fn show_rewarded_ad(&self) -> AdResult {
        self.gate.show_rewarded_ad_after(self.ensure_initialized()).await
    }

    async fn ensure_initialized(&self) {
        if !self.is_initialized() {
            self.initialize(None).await;
        }
    }

    /// Current premium status.
    pub async fn check_premium(&self) -> Arc<PremiumStatus> {
        self.gate.check_status().await
    }

    /// Returns true if any provider can show an ad right now.
    pub fn is_available(&self) -> bool {
        self.gate.registry().is_available()
    }

    /// Diagnostic snapshot.
    pub fn provider_info(&self) -> ServiceInfo {
        let registry = self.gate.registry();
        ServiceInfo {
            initialized: self.is_initialized(),
            available: registry.is_available(),
            active: registry.resolve().provider_info(),
            providers: registry.providers_info(),
            user_id: self.gate.checker().user_id().map(str::to_string),
        }
    }
}

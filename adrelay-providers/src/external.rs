//! Provider backed by a third-party ad SDK loaded at runtime.

use adrelay_core::{AdResult, ProviderInfo, ProviderKind, ProviderState, REWARD_EXTRA_GAME};
use adrelay_fetch::{AdController, HostContext, SdkConfig, SdkError, SdkRuntime};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::provider::{AdProvider, ProviderConfig};

/// Script URL of the Adsgram SDK.
pub const ADSGRAM_SCRIPT_URL: &str = "https://sad.adsgram.ai/js/sad.min.js";

struct LoadedSdk {
    controller: Arc<dyn AdController>,
    block_id: String,
}

/// Rewarded ads through an external SDK.
///
/// `initialize` loads the SDK script once, then asks the runtime for a
/// controller bound to the configured block id. Any failure leaves the
/// provider permanently unavailable.
pub struct ExternalSdkProvider {
    kind: ProviderKind,
    default_script_url: &'static str,
    sdk: Arc<dyn SdkRuntime>,
    script_timeout: Duration,
    loaded: OnceCell<Result<LoadedSdk, SdkError>>,
}

impl ExternalSdkProvider {
    /// Creates a provider of `kind` that loads `default_script_url` unless
    /// the config overrides it.
    pub fn new(
        kind: ProviderKind,
        default_script_url: &'static str,
        sdk: Arc<dyn SdkRuntime>,
        script_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            default_script_url,
            sdk,
            script_timeout,
            loaded: OnceCell::new(),
        }
    }

    /// Creates the Adsgram provider from the host context.
    pub fn adsgram(ctx: &HostContext) -> Self {
        Self::new(
            ProviderKind::Adsgram,
            ADSGRAM_SCRIPT_URL,
            Arc::clone(&ctx.sdk),
            ctx.settings.script_timeout,
        )
    }

    /// Current initialization state.
    pub fn state(&self) -> ProviderState {
        match self.loaded.get() {
            None => ProviderState::Uninitialized,
            Some(Ok(_)) => ProviderState::Ready,
            Some(Err(e)) => ProviderState::Failed(e.to_string()),
        }
    }

    async fn load(&self, config: &ProviderConfig) -> Result<LoadedSdk, SdkError> {
        let network = config
            .network(self.kind)
            .filter(|n| !n.block_id.trim().is_empty())
            .ok_or_else(|| SdkError::LoadFailed(format!("no block id for {}", self.kind)))?;

        let src = network.script_url.as_deref().unwrap_or(self.default_script_url);
        debug!(src, "Loading SDK script");

        tokio::time::timeout(self.script_timeout, self.sdk.load_script(src))
            .await
            .map_err(|_| SdkError::LoadTimeout(self.script_timeout))??;

        let sdk_config = SdkConfig {
            block_id: network.block_id.clone(),
            debug: network.debug,
        };
        let controller = self
            .sdk
            .init(&sdk_config)
            .ok_or_else(|| SdkError::GlobalMissing(self.kind.id().to_string()))?;

        Ok(LoadedSdk {
            controller,
            block_id: sdk_config.block_id,
        })
    }
}

#[async_trait]
impl AdProvider for ExternalSdkProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    #[instrument(skip(self, config), fields(provider = %self.kind))]
    async fn initialize(&self, config: &ProviderConfig) -> bool {
        let outcome = self.loaded.get_or_init(|| self.load(config)).await;
        match outcome {
            Ok(loaded) => {
                info!(block_id = %loaded.block_id, "SDK ready");
                true
            }
            Err(e) => {
                warn!(error = %e, "SDK unavailable");
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        matches!(self.loaded.get(), Some(Ok(_)))
    }

    #[instrument(skip(self), fields(provider = %self.kind))]
    async fn show_rewarded_ad(&self) -> AdResult {
        let loaded = match self.loaded.get() {
            Some(Ok(loaded)) => loaded,
            Some(Err(e)) => return AdResult::failure(self.name(), format!("unavailable: {e}")),
            None => return AdResult::failure(self.name(), "not initialized"),
        };

        match loaded.controller.show().await {
            Ok(()) => {
                info!("Rewarded ad completed");
                AdResult::rewarded(self.name(), REWARD_EXTRA_GAME)
                    .with_debug(format!("block {}", loaded.block_id))
            }
            Err(e) => {
                warn!(error = %e, "Rewarded ad failed");
                AdResult::failure(self.name(), e.to_string())
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        let mut info = ProviderInfo::new(self.kind, self.state(), self.is_available())
            .with_detail("script_timeout_ms", self.script_timeout.as_millis());
        if let Some(Ok(loaded)) = self.loaded.get() {
            info = info.with_detail("block_id", &loaded.block_id);
        }
        info
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Provider capability contract and configuration.

use adrelay_core::{AdResult, ProviderInfo, ProviderKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Provider Config
// ============================================================================

/// Per-network configuration for an SDK-backed provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkProviderConfig {
    /// Ad block (placement) id issued by the network.
    pub block_id: String,
    /// Script URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_url: Option<String>,
    /// Request test ads.
    #[serde(default)]
    pub debug: bool,
}

impl SdkProviderConfig {
    /// Creates a config for `block_id`.
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            script_url: None,
            debug: false,
        }
    }
}

/// Configuration passed to [`AdProvider::initialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// SDK settings keyed by provider.
    pub networks: BTreeMap<ProviderKind, SdkProviderConfig>,
}

impl ProviderConfig {
    /// Adds network settings.
    pub fn with_network(mut self, kind: ProviderKind, config: SdkProviderConfig) -> Self {
        self.networks.insert(kind, config);
        self
    }

    /// Returns the settings for `kind`.
    pub fn network(&self, kind: ProviderKind) -> Option<&SdkProviderConfig> {
        self.networks.get(&kind)
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// A rewarded-ad source.
///
/// ## Contract
///
/// - [`initialize`](Self::initialize) is idempotent: the first call commits
///   the outcome, later calls return it without redoing work.
/// - [`is_available`](Self::is_available) never performs I/O and only
///   reflects committed state.
/// - [`show_rewarded_ad`](Self::show_rewarded_ad) always resolves; every
///   failure is an `AdResult` with `success == false`.
#[async_trait]
pub trait AdProvider: Send + Sync {
    /// The kind of provider.
    fn kind(&self) -> ProviderKind;

    /// Name reported in [`AdResult::provider`].
    fn name(&self) -> &str {
        self.kind().id()
    }

    /// Performs any setup (script loading, validation).
    ///
    /// Returns true if the provider is ready.
    async fn initialize(&self, config: &ProviderConfig) -> bool;

    /// Returns true if the provider can show an ad right now.
    fn is_available(&self) -> bool;

    /// Shows one rewarded ad.
    async fn show_rewarded_ad(&self) -> AdResult;

    /// Diagnostic snapshot.
    fn provider_info(&self) -> ProviderInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_shape() {
        let json = r#"{"networks":{"adsgram":{"blockId":"int-123","debug":true}}}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        let adsgram = config.network(ProviderKind::Adsgram).unwrap();
        assert_eq!(adsgram.block_id, "int-123");
        assert!(adsgram.debug);
        assert!(adsgram.script_url.is_none());
        assert!(config.network(ProviderKind::Monetag).is_none());
    }

    #[test]
    fn test_empty_config() {
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();
        assert!(config.networks.is_empty());
    }
}

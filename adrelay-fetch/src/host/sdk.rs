//! Third-party ad SDK loading.
//!
//! A network SDK ships as a script. Once the host has loaded the script it
//! exposes an `init(config)` entry point that returns a controller; the
//! controller's `show()` plays one rewarded ad. [`SdkRuntime`] is the seam
//! the host implements to perform those two steps.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::SdkError;

// ============================================================================
// SDK Config
// ============================================================================

/// Configuration passed to the SDK's `init` entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// Ad block (placement) identifier issued by the network.
    pub block_id: String,
    /// Ask the network for test ads.
    #[serde(default)]
    pub debug: bool,
}

// ============================================================================
// Traits
// ============================================================================

/// Controller returned by a loaded SDK.
#[async_trait]
pub trait AdController: Send + Sync {
    /// Plays one rewarded ad to completion.
    ///
    /// `Ok(())` means the user watched the ad and earned the reward.
    async fn show(&self) -> Result<(), SdkError>;
}

/// Host capability to load and initialize a third-party SDK.
#[async_trait]
pub trait SdkRuntime: Send + Sync {
    /// Loads the script at `src`. Resolves when the script has loaded.
    async fn load_script(&self, src: &str) -> Result<(), SdkError>;

    /// Calls the SDK's `init` entry point.
    ///
    /// Returns `None` when the loaded script did not expose it.
    fn init(&self, config: &SdkConfig) -> Option<Arc<dyn AdController>>;
}

// ============================================================================
// No-op Runtime
// ============================================================================

/// Runtime for hosts that cannot execute third-party scripts.
///
/// Every load fails, so SDK-backed providers stay unavailable and the
/// registry falls through to the self-hosted carousel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSdkRuntime;

#[async_trait]
impl SdkRuntime for NoSdkRuntime {
    async fn load_script(&self, _src: &str) -> Result<(), SdkError> {
        Err(SdkError::Unsupported)
    }

    fn init(&self, _config: &SdkConfig) -> Option<Arc<dyn AdController>> {
        None
    }
}

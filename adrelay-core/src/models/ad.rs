//! Ad result types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::premium::PremiumStatus;

/// Reward granted for a fully watched rewarded ad.
pub const REWARD_EXTRA_GAME: &str = "extra_game";

/// Provider name reported when a premium user bypasses the ad.
pub const PREMIUM_SKIP_PROVIDER: &str = "premium_skip";

// ============================================================================
// Ad Result
// ============================================================================

/// Outcome of one rewarded-ad request.
///
/// Produced by exactly one provider invocation, or synthesized by the
/// premium gate when the user is ad-free. Callers branch only on
/// [`success`](Self::success) and [`skipped`](Self::skipped):
///
/// - `success && skipped`: premium bypass, proceed as if watched
/// - `success && !skipped`: the ad was watched, grant [`reward`](Self::reward)
/// - `!success`: offer the user a retry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResult {
    /// Whether the ad completed (or was bypassed).
    pub success: bool,
    /// Name of the provider that produced this result.
    pub provider: String,
    /// Reward identifier, present only on a watched ad.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Free-form diagnostic detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// Premium status fetched by the gate before this result was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<PremiumStatus>,
    /// True when the ad was bypassed because of a premium entitlement.
    #[serde(default)]
    pub skipped: bool,
}

impl AdResult {
    /// Creates a successful result carrying a reward.
    pub fn rewarded(provider: impl Into<String>, reward: impl Into<String>) -> Self {
        Self {
            success: true,
            provider: provider.into(),
            reward: Some(reward.into()),
            error: None,
            debug: None,
            timestamp: Utc::now().timestamp_millis(),
            premium: None,
            skipped: false,
        }
    }

    /// Creates a failed result.
    pub fn failure(provider: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            provider: provider.into(),
            reward: None,
            error: Some(error.into()),
            debug: None,
            timestamp: Utc::now().timestamp_millis(),
            premium: None,
            skipped: false,
        }
    }

    /// Creates the synthetic result for a premium user.
    pub fn premium_skip(status: PremiumStatus) -> Self {
        Self {
            success: true,
            provider: PREMIUM_SKIP_PROVIDER.to_string(),
            reward: None,
            error: None,
            debug: Some(status.reason.clone()),
            timestamp: Utc::now().timestamp_millis(),
            premium: Some(status),
            skipped: true,
        }
    }

    /// Attaches diagnostic detail.
    pub fn with_debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = Some(debug.into());
        self
    }

    /// Tags the result with the premium status fetched before the ad ran.
    pub fn with_premium(mut self, status: PremiumStatus) -> Self {
        self.premium = Some(status);
        self.skipped = false;
        self
    }

    /// Returns true if the caller should grant the in-game reward.
    pub fn grants_reward(&self) -> bool {
        self.success
    }

    /// Returns true if the failure was caused by the viewport orientation.
    pub fn is_orientation_failure(&self) -> bool {
        !self.success
            && self
                .error
                .as_deref()
                .is_some_and(|e| e.contains("orientation"))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Premium ("ad-free") entitlement types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason reported when the entitlement check could not be completed.
pub(crate) const CHECK_FAILED_REASON: &str = "Error checking premium status";

// ============================================================================
// Premium Type
// ============================================================================

/// Kind of premium entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumType {
    /// Purchased once, never expires.
    Forever,
    /// Time-limited, see [`PremiumStatus::days_left`].
    Temporary,
}

impl fmt::Display for PremiumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forever => write!(f, "forever"),
            Self::Temporary => write!(f, "temporary"),
        }
    }
}

// ============================================================================
// Premium Status
// ============================================================================

/// Premium entitlement of one user, as reported by the backend.
///
/// Always fetched fresh; there is no persistent cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatus {
    /// Whether ads should be bypassed.
    pub has_premium: bool,
    /// Entitlement kind, when premium.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<PremiumType>,
    /// Remaining days of a temporary entitlement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_left: Option<u32>,
    /// Human-readable explanation from the backend (or the local fallback).
    #[serde(default)]
    pub reason: String,
}

impl PremiumStatus {
    /// A non-premium status with the given reason.
    pub fn none(reason: impl Into<String>) -> Self {
        Self {
            has_premium: false,
            premium_type: None,
            days_left: None,
            reason: reason.into(),
        }
    }

    /// A permanent premium status.
    pub fn forever(reason: impl Into<String>) -> Self {
        Self {
            has_premium: true,
            premium_type: Some(PremiumType::Forever),
            days_left: None,
            reason: reason.into(),
        }
    }

    /// A time-limited premium status.
    pub fn temporary(days_left: u32, reason: impl Into<String>) -> Self {
        Self {
            has_premium: true,
            premium_type: Some(PremiumType::Temporary),
            days_left: Some(days_left),
            reason: reason.into(),
        }
    }

    /// The fail-closed status used whenever the check cannot complete.
    ///
    /// Fail-closed means ads keep being shown.
    pub fn check_failed() -> Self {
        Self::none(CHECK_FAILED_REASON)
    }

    /// Returns true if this is the fail-closed fallback.
    pub fn is_check_failure(&self) -> bool {
        !self.has_premium && self.reason == CHECK_FAILED_REASON
    }
}

// ============================================================================
// Wire Envelope
// ============================================================================

/// Response body of `GET /premium-status/{userId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumResponse {
    /// Whether the backend could answer.
    pub success: bool,
    /// The status, present on success.
    #[serde(default)]
    pub premium: Option<PremiumStatus>,
}

impl PremiumResponse {
    /// Converts the envelope into a status, treating any non-success body
    /// as a failed check.
    pub fn into_status(self) -> Option<PremiumStatus> {
        if self.success { self.premium } else { None }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failed_is_fail_closed() {
        let status = PremiumStatus::check_failed();
        assert!(!status.has_premium);
        assert_eq!(status.reason, "Error checking premium status");
        assert!(status.is_check_failure());
        assert!(!PremiumStatus::none("No premium").is_check_failure());
    }

    #[test]
    fn test_envelope_success() {
        let body = r#"{"success":true,"premium":{"hasPremium":true,"type":"temporary","daysLeft":3,"reason":"Trial"}}"#;
        let resp: PremiumResponse = serde_json::from_str(body).unwrap();
        let status = resp.into_status().unwrap();
        assert!(status.has_premium);
        assert_eq!(status.premium_type, Some(PremiumType::Temporary));
        assert_eq!(status.days_left, Some(3));
    }

    #[test]
    fn test_envelope_failure() {
        let body = r#"{"success":false}"#;
        let resp: PremiumResponse = serde_json::from_str(body).unwrap();
        assert!(resp.into_status().is_none());
    }

    #[test]
    fn test_premium_type_display() {
        assert_eq!(PremiumType::Forever.to_string(), "forever");
        assert_eq!(PremiumType::Temporary.to_string(), "temporary");
    }
}

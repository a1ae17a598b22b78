//! Provider-related types.
//!
//! This module contains types related to ad providers:
//! - [`ProviderKind`] - Enum of known ad sources
//! - [`ProviderState`] - Initialization state machine
//! - [`ProviderInfo`] - Diagnostic snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Known rewarded-ad sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Adsgram network (external SDK).
    Adsgram,
    /// Monetag network (not integrated yet).
    Monetag,
    /// RichAds network (not integrated yet).
    RichAds,
    /// Self-hosted creative carousel.
    Carousel,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Adsgram => "Adsgram",
            Self::Monetag => "Monetag",
            Self::RichAds => "RichAds",
            Self::Carousel => "Carousel",
        }
    }

    /// Returns the short identifier used in results and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Adsgram => "adsgram",
            Self::Monetag => "monetag",
            Self::RichAds => "richads",
            Self::Carousel => "carousel",
        }
    }

    /// Returns all provider kinds in default priority order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Adsgram, Self::Monetag, Self::RichAds, Self::Carousel]
    }

    /// Returns true for the self-hosted fallback.
    pub fn is_self_hosted(&self) -> bool {
        matches!(self, Self::Carousel)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .find(|k| k.id() == needle)
            .copied()
            .ok_or_else(|| CoreError::UnknownProvider(s.to_string()))
    }
}

// ============================================================================
// Provider State
// ============================================================================

/// Initialization state of a provider.
///
/// Transitions once: `Uninitialized -> Ready | Failed`. A failed provider
/// stays unavailable; initialization is never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum ProviderState {
    /// `initialize` has not completed yet.
    #[default]
    Uninitialized,
    /// Ready to show ads.
    Ready,
    /// Initialization failed with the given reason.
    Failed(String),
}

impl ProviderState {
    /// Returns true once initialization has completed, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Returns true if the provider is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// Provider Info
// ============================================================================

/// Diagnostic snapshot of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider name as it appears in [`AdResult::provider`](crate::AdResult).
    pub name: String,
    /// Provider kind.
    pub kind: ProviderKind,
    /// Initialization state.
    pub state: ProviderState,
    /// Result of `is_available()` when the snapshot was taken.
    pub available: bool,
    /// Provider-specific details (block id, creative count, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ProviderInfo {
    /// Creates an info snapshot without details.
    pub fn new(kind: ProviderKind, state: ProviderState, available: bool) -> Self {
        Self {
            name: kind.id().to_string(),
            kind,
            state,
            available,
            details: BTreeMap::new(),
        }
    }

    /// Adds a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_ends_with_carousel() {
        let all = ProviderKind::all();
        assert_eq!(all.first(), Some(&ProviderKind::Adsgram));
        assert_eq!(all.last(), Some(&ProviderKind::Carousel));
        assert!(ProviderKind::Carousel.is_self_hosted());
        assert!(!ProviderKind::Adsgram.is_self_hosted());
    }

    #[test]
    fn test_parse_provider_kind() {
        assert_eq!("adsgram".parse::<ProviderKind>().unwrap(), ProviderKind::Adsgram);
        assert_eq!(" RichAds ".parse::<ProviderKind>().unwrap(), ProviderKind::RichAds);
        assert!("unknown".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_state_transitions() {
        assert!(!ProviderState::Uninitialized.is_settled());
        assert!(ProviderState::Ready.is_settled());
        assert!(ProviderState::Failed("x".into()).is_settled());
        assert!(!ProviderState::Failed("x".into()).is_ready());
        assert_eq!(ProviderState::Failed("boom".into()).to_string(), "failed: boom");
    }

    #[test]
    fn test_info_details() {
        let info = ProviderInfo::new(ProviderKind::Carousel, ProviderState::Ready, true)
            .with_detail("creatives", 3);
        assert_eq!(info.name, "carousel");
        assert_eq!(info.details.get("creatives").map(String::as_str), Some("3"));
    }
}

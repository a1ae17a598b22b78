//! Domain models for `AdRelay`.
//!
//! This module contains the core data structures representing ad results,
//! premium entitlements, providers, and the self-hosted carousel creatives.
//!
//! ## Submodules
//!
//! - [`ad`] - Ad result types (`AdResult`, reward constants)
//! - [`premium`] - Premium entitlement (`PremiumStatus`, `PremiumResponse`)
//! - [`provider`] - Provider types (`ProviderKind`, `ProviderState`, `ProviderInfo`)
//! - [`creative`] - Carousel creatives (`CreativeEntry`, `LocalizedText`)
//! - [`host`] - Host signals (`Language`, `Orientation`, `ViewportSize`)

mod ad;
mod creative;
mod host;
mod premium;
mod provider;

// Re-export everything at the models level
pub use ad::{AdResult, PREMIUM_SKIP_PROVIDER, REWARD_EXTRA_GAME};
pub use creative::{CreativeEntry, LocalizedText};
pub use host::{Language, Orientation, ViewportSize};
pub use premium::{PremiumResponse, PremiumStatus, PremiumType};
pub use provider::{ProviderInfo, ProviderKind, ProviderState};

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `AdRelay` Core
//!
//! Core types, models, and traits for the `AdRelay` rewarded-ad engine.
//!
//! This crate provides the foundational abstractions used across all other
//! `AdRelay` crates, including:
//!
//! - Domain models (ad results, premium status, creatives, providers)
//! - Error types
//! - Trait definitions for host-supplied signals
//!
//! ## Key Types
//!
//! ### Ad Results
//! - [`AdResult`] - Outcome of one rewarded-ad request, with provenance
//! - [`REWARD_EXTRA_GAME`] - Reward granted for a fully watched ad
//!
//! ### Premium
//! - [`PremiumStatus`] - Ad-free entitlement of a user
//! - [`PremiumType`] - Forever or temporary entitlement
//! - [`PremiumResponse`] - Wire envelope of the entitlement endpoint
//!
//! ### Providers
//! - [`ProviderKind`] - Enum of the known ad sources
//! - [`ProviderState`] - Initialization state of a provider
//! - [`ProviderInfo`] - Diagnostic snapshot of a provider
//!
//! ### Carousel & Host
//! - [`CreativeEntry`] - One self-hosted creative
//! - [`LocalizedText`] - Per-language text with fallback
//! - [`Language`] - Supported UI languages
//! - [`Orientation`] / [`ViewportSize`] - Viewport geometry

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Ad results
    AdResult,
    PREMIUM_SKIP_PROVIDER,
    REWARD_EXTRA_GAME,
    // Premium
    PremiumResponse,
    PremiumStatus,
    PremiumType,
    // Providers
    ProviderInfo,
    ProviderKind,
    ProviderState,
    // Carousel & host
    CreativeEntry,
    Language,
    LocalizedText,
    Orientation,
    ViewportSize,
};

// Re-export traits
pub use traits::{resolve_language, FixedLanguage, LanguageSource};

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AdRelay Providers
//!
//! Rewarded-ad providers and the orchestration built on top of them.
//!
//! ## Providers
//!
//! | Provider | Kind | Availability |
//! |----------|------|--------------|
//! | Adsgram | External SDK | After its script loads and exposes a controller |
//! | Monetag | Stub | Never |
//! | RichAds | Stub | Never |
//! | Carousel | Self-hosted | Portrait viewport with at least one creative |
//!
//! ## Layers
//!
//! - [`provider::AdProvider`] - Uniform capability contract
//! - [`registry::ProviderRegistry`] - Ordered providers, resolves the one to use
//! - [`gate::PremiumGate`] - Entitlement check before any provider runs
//! - [`service::AdService`] - The facade consumed by game screens
//!
//! ## Usage
//!
//! ```ignore
//! use adrelay_fetch::{HostContext, PremiumChecker};
//! use adrelay_providers::{AdService, PremiumGate, ProviderConfig, ProviderRegistry};
//!
//! let ctx = HostContext::builder().api_base_url("https://api.example.com").build();
//! let registry = ProviderRegistry::standard(&ctx, adrelay_providers::default_creatives());
//! let checker = PremiumChecker::from_context(&ctx, Some("42".to_string()))?;
//! let service = AdService::new(PremiumGate::new(checker, registry), ProviderConfig::default());
//!
//! let result = service.show_rewarded_ad().await;
//! if result.success {
//!     // grant the reward, or proceed if `result.skipped`
//! }
//! ```

pub mod carousel;
pub mod external;
pub mod gate;
pub mod provider;
pub mod registry;
pub mod service;
pub mod stubs;

// Re-export key types
pub use carousel::{default_creatives, CarouselProvider, CarouselSession, SessionOutcome};
pub use external::ExternalSdkProvider;
pub use gate::PremiumGate;
pub use provider::{AdProvider, ProviderConfig, SdkProviderConfig};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use service::{AdService, ServiceInfo};
pub use stubs::StubProvider;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AdRelay Fetch
//!
//! Host APIs and remote checks for the AdRelay rewarded-ad engine.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for everything the engine
//! touches outside itself:
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`host::viewport`] - Viewport size and orientation-change listeners
//! - [`host::surface`] - UI surface the carousel mounts its modal on
//! - [`host::sdk`] - Third-party ad SDK loading
//!
//! ## Entitlement
//!
//! - [`single_flight::SingleFlight`] - Coalesces concurrent identical calls
//! - [`premium::PremiumChecker`] - Fail-closed, single-flight premium check
//! - [`context::HostContext`] - Bundles the host APIs for providers
//!
//! ## Example
//!
//! ```ignore
//! use adrelay_fetch::{HostContext, PremiumChecker};
//!
//! let ctx = HostContext::builder().api_base_url("https://api.example.com").build();
//! let checker = PremiumChecker::from_context(&ctx, Some("42".to_string()))?;
//!
//! // Concurrent calls share one request
//! let status = checker.check_status().await;
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod host;
pub mod premium;
pub mod single_flight;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, HttpError, SdkError};

// Host APIs
pub use host::{
    http::HttpClient,
    sdk::{AdController, NoSdkRuntime, SdkConfig, SdkRuntime},
    surface::{
        AdSurface, CreativeFrame, HeadlessSurface, ModalSpec, MountedModal, SurfaceEvent,
        SurfaceHandle,
    },
    viewport::{OrientationListener, Viewport},
};

// Entitlement & context
pub use context::{HostContext, HostContextBuilder, HostSettings};
pub use premium::{EntitlementApi, HttpEntitlementApi, PremiumChecker};
pub use single_flight::SingleFlight;

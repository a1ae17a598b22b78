//! Host API abstractions.
//!
//! Each submodule wraps one thing the engine consumes from its host:
//! network access, the viewport, the UI surface, and the third-party SDK.

pub mod http;
pub mod sdk;
pub mod surface;
pub mod viewport;

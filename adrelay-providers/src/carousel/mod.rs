//! Self-hosted creative carousel.
//!
//! The fallback provider. It needs no network: it mounts a full-screen
//! modal, rotates the configured creatives, and grants the reward once the
//! sum of their durations has elapsed in portrait orientation.

mod creatives;
mod provider;
mod session;

pub use creatives::default_creatives;
pub use provider::CarouselProvider;
pub use session::{CarouselSession, SessionOutcome};

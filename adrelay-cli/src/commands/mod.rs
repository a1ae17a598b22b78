//! CLI command implementations.

pub mod config;
pub mod premium;
pub mod providers;
pub mod show;

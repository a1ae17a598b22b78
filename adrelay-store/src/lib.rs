// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AdRelay Store
//!
//! Local state for the AdRelay tools.
//!
//! - **SettingsStore**: backend URL, timeouts, provider config, creatives
//! - **AppContext**: the persisted language and user id
//! - **Persistence**: atomic JSON file I/O with owner-only permissions
//!
//! ## Usage
//!
//! ```ignore
//! use adrelay_store::{AppContext, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await?;
//! settings.set_api_base_url(Some("https://api.example.com".into())).await;
//! settings.save().await?;
//!
//! let mut context = AppContext::load_default().await;
//! context.set_user_id("123456789");
//! context.save_default().await?;
//! ```

pub mod context;
pub mod error;
pub mod persistence;
pub mod settings;

pub use context::AppContext;
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_context_path, default_settings_path, ensure_dir, load_json,
    load_json_or_default, save_json,
};
pub use settings::{LogLevel, Settings, SettingsStore};

#[cfg(test)]
mod persistence_tests;

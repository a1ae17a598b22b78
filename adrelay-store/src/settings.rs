//! Engine settings store.
//!
//! Manages settings with persistence and change notification.

use adrelay_core::CreativeEntry;
use adrelay_providers::{default_creatives, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL for the premium check.
    pub api_base_url: Option<String>,

    /// Premium check timeout in seconds.
    pub premium_timeout_secs: u64,

    /// SDK script load timeout in seconds.
    pub script_timeout_secs: u64,

    /// Per-network SDK configuration.
    pub provider_config: ProviderConfig,

    /// Replaces the built-in carousel creatives when set.
    pub creatives: Option<Vec<CreativeEntry>>,

    /// Log level when not running verbose.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            premium_timeout_secs: 8,
            script_timeout_secs: 10,
            provider_config: ProviderConfig::default(),
            creatives: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Keys accepted by [`Settings::set`].
    pub const KEYS: &'static [&'static str] = &[
        "api_base_url",
        "premium_timeout_secs",
        "script_timeout_secs",
        "log_level",
    ];

    /// Premium check timeout.
    pub fn premium_timeout(&self) -> Duration {
        Duration::from_secs(self.premium_timeout_secs)
    }

    /// SDK script load timeout.
    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }

    /// Creatives to play: the override if set, otherwise the built-in ones.
    pub fn creatives(&self) -> Vec<CreativeEntry> {
        self.creatives.clone().unwrap_or_else(default_creatives)
    }

    /// Sets a scalar setting from its string form. An empty value clears
    /// optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let value = value.trim();
        match key {
            "api_base_url" => {
                self.api_base_url = (!value.is_empty()).then(|| value.to_string());
            }
            "premium_timeout_secs" => self.premium_timeout_secs = parse_secs(key, value)?,
            "script_timeout_secs" => self.script_timeout_secs = parse_secs(key, value)?,
            "log_level" => self.log_level = value.parse()?,
            _ => return Err(StoreError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, StoreError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(StoreError::Config(format!(
            "{key} must be a positive number of seconds, got {value:?}"
        ))),
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(StoreError::Config(format!("unknown log level: {other}"))),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings with persistence and change notification.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
}

impl SettingsStore {
    /// Creates a store with default settings backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
        }
    }

    /// Loads settings from the default location.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from `path`. A missing file yields defaults; a
    /// malformed one is an error so it is never silently overwritten.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = match load_json(&path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings");
                return Err(e);
            }
        };
        Ok(Self::with_settings(path, settings))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify.send_modify(|version| *version += 1);
    }

    /// Sets one setting by key; see [`Settings::set`].
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.get().await;
        next.set(key, value)?;
        self.update(|s| *s = next).await;
        Ok(())
    }

    /// Saves settings to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Subscribes to change notifications. The value is a version counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Backend base URL.
    pub async fn api_base_url(&self) -> Option<String> {
        self.settings.read().await.api_base_url.clone()
    }

    /// Sets the backend base URL.
    pub async fn set_api_base_url(&self, url: Option<String>) {
        self.update(|s| s.api_base_url = url).await;
    }

    /// Provider configuration.
    pub async fn provider_config(&self) -> ProviderConfig {
        self.settings.read().await.provider_config.clone()
    }

    /// Replaces the provider configuration.
    pub async fn set_provider_config(&self, config: ProviderConfig) {
        self.update(|s| s.provider_config = config).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Host context providing access to host APIs.
//!
//! The host context is handed to providers at construction and bundles
//! everything they consume from the host: network, viewport, UI surface,
//! SDK runtime, and the language sources.

use adrelay_core::{FixedLanguage, Language, LanguageSource};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::host::{
    http::HttpClient,
    sdk::{NoSdkRuntime, SdkRuntime},
    surface::{AdSurface, HeadlessSurface},
    viewport::Viewport,
};

// ============================================================================
// Host Settings
// ============================================================================

/// Settings for remote operations.
#[derive(Debug, Clone)]
pub struct HostSettings {
    /// Backend base URL for the entitlement endpoint.
    pub api_base_url: Option<String>,
    /// Timeout for the premium check.
    pub premium_timeout: Duration,
    /// Timeout for loading a third-party SDK script.
    pub script_timeout: Duration,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            premium_timeout: Duration::from_secs(8),
            script_timeout: Duration::from_secs(10),
        }
    }
}

// ============================================================================
// Host Context
// ============================================================================

/// Context provided to providers, giving access to host APIs.
pub struct HostContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Host viewport.
    pub viewport: Viewport,
    /// UI surface for the self-hosted carousel.
    pub surface: Arc<dyn AdSurface>,
    /// Third-party script runtime.
    pub sdk: Arc<dyn SdkRuntime>,
    /// Language sources in priority order.
    pub languages: Vec<Arc<dyn LanguageSource>>,
    /// Remote settings.
    pub settings: HostSettings,
}

impl HostContext {
    /// Creates a headless context: portrait viewport, no SDK runtime.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> HostContextBuilder {
        HostContextBuilder::new()
    }

    /// Resolves the current language from the configured sources.
    pub fn language(&self) -> Language {
        adrelay_core::resolve_language(&self.languages)
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("viewport", &self.viewport)
            .field("languages", &self.languages.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Host Context Builder
// ============================================================================

/// Builder for constructing a `HostContext`.
pub struct HostContextBuilder {
    http: Option<Arc<HttpClient>>,
    viewport: Option<Viewport>,
    surface: Option<Arc<dyn AdSurface>>,
    sdk: Option<Arc<dyn SdkRuntime>>,
    languages: Vec<Arc<dyn LanguageSource>>,
    settings: HostSettings,
}

impl HostContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            viewport: None,
            surface: None,
            sdk: None,
            languages: Vec::new(),
            settings: HostSettings::default(),
        }
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Sets the UI surface.
    pub fn surface(mut self, surface: Arc<dyn AdSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets the SDK runtime.
    pub fn sdk(mut self, sdk: Arc<dyn SdkRuntime>) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Appends a language source (lower priority than those already added).
    pub fn language_source(mut self, source: Arc<dyn LanguageSource>) -> Self {
        self.languages.push(source);
        self
    }

    /// Appends a fixed language.
    pub fn language(self, language: Language) -> Self {
        self.language_source(Arc::new(FixedLanguage(language)))
    }

    /// Sets the backend base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.api_base_url = Some(url.into());
        self
    }

    /// Sets the premium check timeout.
    pub fn premium_timeout(mut self, timeout: Duration) -> Self {
        self.settings.premium_timeout = timeout;
        self
    }

    /// Sets the SDK script load timeout.
    pub fn script_timeout(mut self, timeout: Duration) -> Self {
        self.settings.script_timeout = timeout;
        self
    }

    /// Builds the host context.
    pub fn build(self) -> HostContext {
        let settings = self.settings;
        let http = self.http.unwrap_or_else(|| {
            let client = HttpClient::with_timeout(settings.premium_timeout);
            // Pin the default client to the backend host.
            let backend_host = settings
                .api_base_url
                .as_deref()
                .and_then(|base| Url::parse(base).ok())
                .and_then(|url| url.host_str().map(str::to_string));
            Arc::new(match backend_host {
                Some(host) => client.allow_host(host),
                None => client,
            })
        });
        HostContext {
            http,
            viewport: self.viewport.unwrap_or_default(),
            surface: self
                .surface
                .unwrap_or_else(|| Arc::new(HeadlessSurface::new())),
            sdk: self.sdk.unwrap_or_else(|| Arc::new(NoSdkRuntime)),
            languages: self.languages,
            settings,
        }
    }
}

impl Default for HostContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

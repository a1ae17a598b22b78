//! Ordered registry of ad providers.
//!
//! Networks come first in configuration order; the carousel is always last
//! and always present, so resolution never comes back empty.

use adrelay_core::{CreativeEntry, ProviderInfo};
use adrelay_fetch::HostContext;
use tracing::{debug, info, instrument};

use crate::carousel::CarouselProvider;
use crate::external::ExternalSdkProvider;
use crate::provider::{AdProvider, ProviderConfig};
use crate::stubs::StubProvider;

// ============================================================================
// Provider Registry
// ============================================================================

/// Providers in priority order with the carousel as the fallback.
pub struct ProviderRegistry {
    networks: Vec<Box<dyn AdProvider>>,
    fallback: CarouselProvider,
}

impl ProviderRegistry {
    /// Starts a registry with `fallback` as the last-resort provider.
    pub fn builder(fallback: CarouselProvider) -> ProviderRegistryBuilder {
        ProviderRegistryBuilder {
            networks: Vec::new(),
            fallback,
        }
    }

    /// The production lineup:
    /// 1. Adsgram (external SDK)
    /// 2. Monetag, RichAds (stubs)
    /// 3. Carousel
    pub fn standard(ctx: &HostContext, creatives: Vec<CreativeEntry>) -> Self {
        Self::builder(CarouselProvider::from_context(ctx, creatives))
            .network(ExternalSdkProvider::adsgram(ctx))
            .network(StubProvider::monetag())
            .network(StubProvider::richads())
            .build()
    }

    /// Initializes every provider in order. Failures only affect the
    /// provider that failed.
    ///
    /// Returns the number of providers that became ready.
    #[instrument(skip_all, fields(providers = self.len()))]
    pub async fn initialize(&self, config: &ProviderConfig) -> usize {
        let mut ready = 0;
        for provider in self.providers() {
            if provider.initialize(config).await {
                ready += 1;
            } else {
                debug!(provider = provider.name(), "Provider not ready");
            }
        }
        info!(ready, "Providers initialized");
        ready
    }

    /// Returns the first available provider, or the carousel if none is.
    pub fn resolve(&self) -> &dyn AdProvider {
        self.providers()
            .find(|p| p.is_available())
            .unwrap_or(&self.fallback)
    }

    /// All providers in priority order, fallback last.
    pub fn providers(&self) -> impl Iterator<Item = &dyn AdProvider> {
        self.networks
            .iter()
            .map(|p| &**p as &dyn AdProvider)
            .chain(std::iter::once(&self.fallback as &dyn AdProvider))
    }

    /// Diagnostic snapshots in priority order.
    pub fn providers_info(&self) -> Vec<ProviderInfo> {
        self.providers().map(|p| p.provider_info()).collect()
    }

    /// Returns true if any provider can show an ad right now.
    pub fn is_available(&self) -> bool {
        self.providers().any(|p| p.is_available())
    }

    /// Number of providers, fallback included.
    pub fn len(&self) -> usize {
        self.networks.len() + 1
    }

    /// Always false: the fallback is always registered.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ProviderRegistry`].
pub struct ProviderRegistryBuilder {
    networks: Vec<Box<dyn AdProvider>>,
    fallback: CarouselProvider,
}

impl ProviderRegistryBuilder {
    /// Appends a provider after those already added.
    pub fn network(mut self, provider: impl AdProvider + 'static) -> Self {
        self.networks.push(Box::new(provider));
        self
    }

    /// Builds the registry.
    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            networks: self.networks,
            fallback: self.fallback,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! The carousel as an [`AdProvider`].

use adrelay_core::{
    AdResult, CreativeEntry, LanguageSource, ProviderInfo, ProviderKind, ProviderState,
};
use adrelay_fetch::{AdSurface, HostContext, Viewport};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::session::CarouselSession;
use crate::provider::{AdProvider, ProviderConfig};

/// Fallback provider that plays self-hosted creatives.
///
/// Available whenever the viewport is portrait and at least one creative is
/// configured. It does not depend on `initialize`.
pub struct CarouselProvider {
    creatives: Vec<CreativeEntry>,
    viewport: Viewport,
    surface: Arc<dyn AdSurface>,
    languages: Vec<Arc<dyn LanguageSource>>,
    initialized: AtomicBool,
    sessions: AtomicU64,
}

impl CarouselProvider {
    /// Creates a carousel. Invalid creatives are dropped with a warning.
    pub fn new(
        creatives: Vec<CreativeEntry>,
        viewport: Viewport,
        surface: Arc<dyn AdSurface>,
        languages: Vec<Arc<dyn LanguageSource>>,
    ) -> Self {
        let creatives = creatives
            .into_iter()
            .filter(|c| match c.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Skipping invalid creative");
                    false
                }
            })
            .collect();

        Self {
            creatives,
            viewport,
            surface,
            languages,
            initialized: AtomicBool::new(false),
            sessions: AtomicU64::new(0),
        }
    }

    /// Creates a carousel wired to the host context.
    pub fn from_context(ctx: &HostContext, creatives: Vec<CreativeEntry>) -> Self {
        Self::new(
            creatives,
            ctx.viewport.clone(),
            Arc::clone(&ctx.surface),
            ctx.languages.clone(),
        )
    }

    /// The creatives that will be played.
    pub fn creatives(&self) -> &[CreativeEntry] {
        &self.creatives
    }

    /// Number of sessions started so far.
    pub fn sessions_started(&self) -> u64 {
        self.sessions.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AdProvider for CarouselProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Carousel
    }

    async fn initialize(&self, _config: &ProviderConfig) -> bool {
        self.initialized.store(true, Ordering::Release);
        debug!(creatives = self.creatives.len(), "Carousel ready");
        !self.creatives.is_empty()
    }

    fn is_available(&self) -> bool {
        !self.creatives.is_empty() && self.viewport.is_portrait()
    }

    #[instrument(skip(self), fields(provider = "carousel"))]
    async fn show_rewarded_ad(&self) -> AdResult {
        let session = self.sessions.fetch_add(1, Ordering::Relaxed) + 1;
        let language = adrelay_core::resolve_language(&self.languages);
        debug!(session, %language, "Starting carousel session");

        CarouselSession::new(
            self.name(),
            &self.creatives,
            language,
            &self.viewport,
            Arc::clone(&self.surface),
        )
        .play()
        .await
        .into_result(self.name())
    }

    fn provider_info(&self) -> ProviderInfo {
        let state = if !self.initialized.load(Ordering::Acquire) {
            ProviderState::Uninitialized
        } else if self.creatives.is_empty() {
            ProviderState::Failed("no creatives".to_string())
        } else {
            ProviderState::Ready
        };

        ProviderInfo::new(ProviderKind::Carousel, state, self.is_available())
            .with_detail("creatives", self.creatives.len())
            .with_detail(
                "total_seconds",
                CreativeEntry::total_duration(&self.creatives).as_secs(),
            )
            .with_detail("orientation", self.viewport.orientation())
            .with_detail("sessions", self.sessions_started())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::default_creatives;
    use adrelay_core::{FixedLanguage, Language, ViewportSize};
    use adrelay_fetch::HeadlessSurface;

    fn carousel(viewport: Viewport, creatives: Vec<CreativeEntry>) -> CarouselProvider {
        CarouselProvider::new(
            creatives,
            viewport,
            Arc::new(HeadlessSurface::new()),
            vec![Arc::new(FixedLanguage(Language::Es))],
        )
    }

    #[test]
    fn test_availability_follows_orientation() {
        let viewport = Viewport::portrait();
        let p = carousel(viewport.clone(), default_creatives());
        assert!(p.is_available());

        viewport.resize(ViewportSize::LANDSCAPE);
        assert!(!p.is_available());
    }

    #[tokio::test]
    async fn test_no_creatives_is_unavailable() {
        let p = carousel(Viewport::portrait(), Vec::new());
        assert!(!p.is_available());
        assert!(!p.initialize(&ProviderConfig::default()).await);
        assert_eq!(p.provider_info().state, ProviderState::Failed("no creatives".to_string()));
        assert_eq!(p.show_rewarded_ad().await.error.as_deref(), Some("no creatives"));
    }

    #[test]
    fn test_invalid_creatives_dropped() {
        let mut creatives = default_creatives();
        creatives[1].duration_seconds = 0;
        let p = carousel(Viewport::portrait(), creatives);
        assert_eq!(p.creatives().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_uses_language_snapshot() {
        let p = carousel(Viewport::portrait(), default_creatives());
        let result = p.show_rewarded_ad().await;

        assert!(result.success);
        assert_eq!(result.provider, "carousel");
        assert!(result.debug.unwrap().contains("language es"));
        assert_eq!(p.sessions_started(), 1);
    }

    #[tokio::test]
    async fn test_info_details() {
        let p = carousel(Viewport::portrait(), default_creatives());
        p.initialize(&ProviderConfig::default()).await;

        let info = p.provider_info();
        assert_eq!(info.state, ProviderState::Ready);
        assert!(info.available);
        assert_eq!(info.details["creatives"], "3");
        assert_eq!(info.details["total_seconds"], "24");
        assert_eq!(info.details["orientation"], "portrait");
    }
}

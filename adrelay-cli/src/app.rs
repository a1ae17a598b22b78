//! Composition root: builds the engine from settings, saved context, and
//! command-line overrides.

use adrelay_core::{FixedLanguage, Language, LanguageSource};
use adrelay_fetch::{AdSurface, HostContext, PremiumChecker, Viewport};
use adrelay_providers::{AdService, PremiumGate, ProviderRegistry};
use adrelay_store::{AppContext, Settings, SettingsStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::host::{EnvLocale, NoBackend};
use crate::Cli;

/// Everything a command needs to assemble the engine.
pub struct App {
    /// Saved settings.
    pub settings: Settings,
    /// Saved context.
    pub context: AppContext,
    cli_language: Option<Language>,
    cli_user_id: Option<String>,
}

impl App {
    /// Loads saved state and applies command-line overrides.
    pub async fn load(cli: &Cli, store: &SettingsStore) -> Result<Self> {
        let cli_language = cli
            .language
            .as_deref()
            .map(str::parse::<Language>)
            .transpose()
            .with_context(|| format!("supported languages: {}", language_list()))?;

        Ok(Self {
            settings: store.get().await,
            context: AppContext::load_default().await,
            cli_language,
            cli_user_id: cli.user_id.clone(),
        })
    }

    /// User id for the premium check: the flag, then the saved one.
    pub fn user_id(&self) -> Option<String> {
        self.cli_user_id
            .clone()
            .or_else(|| self.context.user_id.clone())
    }

    /// Language sources in priority order.
    ///
    /// The `--language` flag plays the host i18n runtime, the saved context
    /// is storage, and the process locale is a last hint before the `en`
    /// fallback. The locale stays below storage so `config set-language`
    /// is not overridden by `LANG`.
    pub fn language_sources(&self) -> Vec<Arc<dyn LanguageSource>> {
        self.language_sources_with(EnvLocale::detect())
    }

    fn language_sources_with(&self, locale: EnvLocale) -> Vec<Arc<dyn LanguageSource>> {
        let mut sources: Vec<Arc<dyn LanguageSource>> = Vec::new();
        if let Some(language) = self.cli_language {
            sources.push(Arc::new(FixedLanguage(language)));
        }
        sources.push(Arc::new(self.context.clone()));
        sources.push(Arc::new(locale));
        sources
    }

    /// Builds the host context around `viewport` and `surface`.
    pub fn host(&self, viewport: Viewport, surface: Arc<dyn AdSurface>) -> HostContext {
        let mut builder = HostContext::builder()
            .viewport(viewport)
            .surface(surface)
            .premium_timeout(self.settings.premium_timeout())
            .script_timeout(self.settings.script_timeout());
        if let Some(url) = &self.settings.api_base_url {
            builder = builder.api_base_url(url.clone());
        }
        for source in self.language_sources() {
            builder = builder.language_source(source);
        }
        builder.build()
    }

    /// Builds the premium checker. Without a backend every check fails
    /// closed.
    pub fn checker(&self, host: &HostContext) -> Result<PremiumChecker> {
        if host.settings.api_base_url.is_some() {
            return PremiumChecker::from_context(host, self.user_id())
                .context("invalid api_base_url");
        }
        warn!("api_base_url is not set, premium checks will fail closed");
        Ok(PremiumChecker::new(Arc::new(NoBackend), self.user_id())
            .with_timeout(host.settings.premium_timeout))
    }

    /// Builds the registry with the configured creatives.
    pub fn registry(&self, host: &HostContext) -> ProviderRegistry {
        ProviderRegistry::standard(host, self.settings.creatives())
    }

    /// Builds the full service.
    pub fn service(&self, host: &HostContext) -> Result<AdService> {
        let gate = PremiumGate::new(self.checker(host)?, self.registry(host));
        debug!(language = %host.language(), user = ?self.user_id(), "Service assembled");
        Ok(AdService::new(gate, self.settings.provider_config.clone()))
    }
}

fn language_list() -> String {
    Language::all()
        .iter()
        .map(Language::code)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adrelay_fetch::HeadlessSurface;

    fn app(language: Option<Language>, saved: AppContext) -> App {
        App {
            settings: Settings::default(),
            context: saved,
            cli_language: language,
            cli_user_id: None,
        }
    }

    #[test]
    fn test_flag_language_wins() {
        let mut saved = AppContext::default();
        saved.set_language(Some(Language::Ru));

        let a = app(Some(Language::Id), saved.clone());
        assert_eq!(adrelay_core::resolve_language(&a.language_sources()), Language::Id);

        let b = app(None, saved);
        assert_eq!(adrelay_core::resolve_language(&b.language_sources()), Language::Ru);
    }

    #[test]
    fn test_language_priority_chain() {
        let locale = || EnvLocale::from_values(vec!["es_ES.UTF-8".to_string()]);
        let mut saved = AppContext::default();
        saved.set_language(Some(Language::Uk));

        let names = |a: &App| -> Vec<String> {
            a.language_sources_with(locale())
                .iter()
                .map(|s| s.name().to_string())
                .collect()
        };
        let flagged = app(Some(Language::Tr), saved.clone());
        assert_eq!(names(&flagged), vec!["fixed", "context", "locale"]);
        let resolve = |a: &App| adrelay_core::resolve_language(&a.language_sources_with(locale()));
        assert_eq!(resolve(&flagged), Language::Tr);

        assert_eq!(resolve(&app(None, saved)), Language::Uk);
        assert_eq!(resolve(&app(None, AppContext::default())), Language::Es);
    }

    #[test]
    fn test_saved_user_id() {
        let mut saved = AppContext::default();
        saved.set_user_id("555");
        let mut a = app(None, saved);
        assert_eq!(a.user_id().as_deref(), Some("555"));

        a.cli_user_id = Some("777".to_string());
        assert_eq!(a.user_id().as_deref(), Some("777"));
    }

    #[tokio::test]
    async fn test_service_without_backend_fails_closed() {
        let mut saved = AppContext::default();
        saved.set_user_id("1");
        let a = app(None, saved);
        let host = a.host(Viewport::portrait(), Arc::new(HeadlessSurface::new()));

        let service = a.service(&host).unwrap();
        let status = service.check_premium().await;
        assert!(status.is_check_failure());
    }

    #[test]
    fn test_invalid_backend_url_is_an_error() {
        let mut a = app(None, AppContext::default());
        a.settings.api_base_url = Some("not a url".to_string());
        let host = a.host(Viewport::portrait(), Arc::new(HeadlessSurface::new()));

        assert!(a.service(&host).is_err());
    }
}

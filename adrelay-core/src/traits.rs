//! Trait definitions for `AdRelay`.
//!
//! Host signals the engine reads but never owns are modelled as traits so
//! each host (terminal, tests, embedding app) can plug in its own source.

use crate::models::Language;

/// A source of the current UI language.
///
/// Sources are consulted in priority order; the first one that returns
/// `Some` wins. A source returns `None` when it has no opinion (runtime not
/// loaded, nothing persisted yet).
pub trait LanguageSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns the language this source currently reports, if any.
    fn language(&self) -> Option<Language>;
}

/// A language source that always reports the same value.
///
/// Used for the host i18n runtime when the host already knows the user's
/// language at startup.
#[derive(Debug, Clone, Copy)]
pub struct FixedLanguage(pub Language);

impl LanguageSource for FixedLanguage {
    fn name(&self) -> &str {
        "fixed"
    }

    fn language(&self) -> Option<Language> {
        Some(self.0)
    }
}

/// Resolves the first language reported by `sources`, falling back to
/// [`Language::FALLBACK`].
pub fn resolve_language(sources: &[std::sync::Arc<dyn LanguageSource>]) -> Language {
    sources
        .iter()
        .find_map(|s| s.language())
        .unwrap_or(Language::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Silent;

    impl LanguageSource for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn language(&self) -> Option<Language> {
            None
        }
    }

    #[test]
    fn test_first_source_wins() {
        let sources: Vec<Arc<dyn LanguageSource>> = vec![
            Arc::new(Silent),
            Arc::new(FixedLanguage(Language::Ru)),
            Arc::new(FixedLanguage(Language::Es)),
        ];
        assert_eq!(resolve_language(&sources), Language::Ru);
    }

    #[test]
    fn test_fallback_when_all_silent() {
        let sources: Vec<Arc<dyn LanguageSource>> = vec![Arc::new(Silent)];
        assert_eq!(resolve_language(&sources), Language::En);
        assert_eq!(resolve_language(&[]), Language::En);
    }
}

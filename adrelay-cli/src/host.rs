//! Terminal implementations of the host APIs.

use adrelay_core::{Language, LanguageSource, PremiumStatus};
use adrelay_fetch::{
    AdSurface, CreativeFrame, EntitlementApi, FetchError, ModalSpec, SurfaceHandle,
};
use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::output::TextFormatter;

// ============================================================================
// Terminal Surface
// ============================================================================

/// Renders the carousel modal as terminal output.
pub struct TerminalSurface {
    formatter: TextFormatter,
    next_handle: AtomicU64,
}

impl TerminalSurface {
    /// Creates a surface printing with `formatter`.
    pub fn new(formatter: TextFormatter) -> Self {
        Self {
            formatter,
            next_handle: AtomicU64::new(1),
        }
    }

    fn print(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // The countdown line is redrawn in place
        let _ = write!(stdout, "\r\x1b[2K{line}");
        let _ = stdout.flush();
    }
}

impl AdSurface for TerminalSurface {
    fn mount(&self, spec: &ModalSpec) -> SurfaceHandle {
        let handle = SurfaceHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        println!("{}", self.formatter.format_modal_header(spec));
        handle
    }

    fn render(&self, _handle: SurfaceHandle, frame: &CreativeFrame) {
        self.print(&format!("{}\n", self.formatter.format_frame(frame)));
    }

    fn countdown(&self, _handle: SurfaceHandle, remaining_secs: u64) {
        self.print(&self.formatter.format_countdown(remaining_secs));
    }

    fn unmount(&self, _handle: SurfaceHandle) {
        self.print("");
    }
}

// ============================================================================
// Locale
// ============================================================================

/// Language taken from the POSIX locale variables.
#[derive(Debug, Clone, Copy)]
pub struct EnvLocale(Option<Language>);

impl EnvLocale {
    const VARS: [&'static str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

    /// Reads the process environment.
    pub fn detect() -> Self {
        Self::from_values(Self::VARS.iter().filter_map(|v| std::env::var(v).ok()))
    }

    /// Uses the first non-empty value, like the C library does.
    pub fn from_values(values: impl IntoIterator<Item = String>) -> Self {
        let language = values
            .into_iter()
            .find(|v| !v.trim().is_empty())
            .and_then(|v| Language::from_code(&v));
        Self(language)
    }
}

impl LanguageSource for EnvLocale {
    fn name(&self) -> &str {
        "locale"
    }

    fn language(&self) -> Option<Language> {
        self.0
    }
}

// ============================================================================
// Entitlement
// ============================================================================

/// Entitlement API used when no backend is configured. Every check fails,
/// so users are treated as non-premium.
pub struct NoBackend;

#[async_trait]
impl EntitlementApi for NoBackend {
    async fn fetch_status(&self, _user_id: &str) -> Result<PremiumStatus, FetchError> {
        Err(FetchError::NotConfigured("api_base_url".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_first_non_empty_wins() {
        let locale = EnvLocale::from_values(vec![String::new(), "uk_UA.UTF-8".to_string()]);
        assert_eq!(locale.language(), Some(Language::Uk));
    }

    #[test]
    fn test_locale_unsupported() {
        assert_eq!(EnvLocale::from_values(vec!["C.UTF-8".to_string()]).language(), None);
        assert_eq!(EnvLocale::from_values(vec!["de_DE".to_string()]).language(), None);
        assert_eq!(EnvLocale::from_values(Vec::new()).language(), None);
    }

    #[tokio::test]
    async fn test_no_backend_fails() {
        assert!(matches!(
            NoBackend.fetch_status("1").await,
            Err(FetchError::NotConfigured(_))
        ));
    }
}

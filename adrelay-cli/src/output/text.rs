//! Text output formatting with colors.

use adrelay_core::{AdResult, PremiumStatus, ProviderInfo, ProviderState};
use adrelay_fetch::{CreativeFrame, ModalSpec};
use chrono::{DateTime, Local};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Carousel
    // ========================================================================

    /// Header printed when the carousel modal opens.
    pub fn format_modal_header(&self, spec: &ModalSpec) -> String {
        format!(
            "{} {} · {} creatives · {}s",
            self.cyan("▶"),
            self.bold("Rewarded ad"),
            spec.creative_count,
            spec.total_seconds
        )
    }

    /// One creative.
    pub fn format_frame(&self, frame: &CreativeFrame) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.dim(&format!("[{}]", frame.index + 1)),
            self.bold(&frame.title)
        )];
        if !frame.description.is_empty() {
            lines.push(format!("    {}", frame.description));
        }
        if !frame.button_text.is_empty() {
            lines.push(format!(
                "    {} {}",
                self.cyan(&format!("[ {} ]", frame.button_text)),
                self.dim(&frame.target_url)
            ));
        }
        lines.join("\n")
    }

    /// Countdown line, redrawn every second.
    pub fn format_countdown(&self, remaining_secs: u64) -> String {
        format!("    {} {remaining_secs}s", self.dim("⏱"))
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Formats the outcome of a rewarded-ad flow.
    pub fn format_result(&self, result: &AdResult) -> String {
        let at = DateTime::from_timestamp_millis(result.timestamp)
            .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_default();

        let headline = if result.skipped {
            format!("{} Skipped: premium user", self.green("↷"))
        } else if let Some(reward) = result.reward.as_deref().filter(|_| result.success) {
            format!("{} Reward granted: {}", self.green("✓"), self.bold(reward))
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            format!("{} No reward: {}", self.red("✗"), error)
        };

        let mut lines = vec![format!(
            "{headline} {}",
            self.dim(&format!("({} at {at})", result.provider))
        )];
        if let Some(debug) = &result.debug {
            lines.push(format!("  {}", self.dim(debug)));
        }
        if let Some(premium) = result.premium.as_ref().filter(|_| !result.skipped) {
            lines.push(format!("  {}", self.dim(&format!("premium: {}", premium.reason))));
        }
        lines.join("\n")
    }

    /// Formats a premium status.
    pub fn format_premium(&self, status: &PremiumStatus, user_id: Option<&str>) -> String {
        let user = user_id.unwrap_or("-");
        if !status.has_premium {
            let marker = if status.is_check_failure() {
                self.yellow("?")
            } else {
                self.dim("−")
            };
            return format!("{marker} User {user}: no premium ({})", status.reason);
        }

        let kind = status
            .premium_type
            .map_or_else(|| "premium".to_string(), |t| t.to_string());
        let days = status
            .days_left
            .map(|d| format!(", {d} days left"))
            .unwrap_or_default();
        format!(
            "{} User {user}: {}{days} ({})",
            self.green("★"),
            self.bold(&kind),
            status.reason
        )
    }

    // ========================================================================
    // Providers
    // ========================================================================

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        self.bold(&format!(
            "  {:<12} {:<10} {:<10} {}",
            "Provider", "State", "Available", "Details"
        ))
    }

    /// Formats a single provider line. `active` marks the provider that
    /// would be used now.
    pub fn format_provider_line(&self, info: &ProviderInfo, active: bool) -> String {
        let marker = if active { self.cyan("▶") } else { " ".to_string() };

        let state = format!("{:<10}", state_label(&info.state));
        let state = match info.state {
            ProviderState::Ready => self.green(&state),
            ProviderState::Failed(_) => self.red(&state),
            ProviderState::Uninitialized => self.dim(&state),
        };

        let available = if info.available {
            self.green(&format!("{:<10}", "yes"))
        } else {
            self.dim(&format!("{:<10}", "no"))
        };

        let mut details: Vec<String> =
            info.details.iter().map(|(k, v)| format!("{k}={v}")).collect();
        if let ProviderState::Failed(reason) = &info.state {
            details.insert(0, reason.clone());
        }

        format!(
            "{marker} {:<12} {state} {available} {}",
            info.name,
            self.dim(&details.join(" "))
        )
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

fn state_label(state: &ProviderState) -> &'static str {
    match state {
        ProviderState::Uninitialized => "pending",
        ProviderState::Ready => "ready",
        ProviderState::Failed(_) => "failed",
    }
}

//! Self-hosted carousel creatives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::host::Language;
use crate::error::CoreError;

// ============================================================================
// Localized Text
// ============================================================================

/// Text with per-language variants.
///
/// Lookup falls back to English, then to any variant, then to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Language, String>);

impl LocalizedText {
    /// Creates an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variant.
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.0.insert(language, text.into());
        self
    }

    /// Returns the best variant for `language`.
    pub fn get(&self, language: Language) -> &str {
        self.0
            .get(&language)
            .or_else(|| self.0.get(&Language::FALLBACK))
            .or_else(|| self.0.values().next())
            .map_or("", String::as_str)
    }

    /// Returns true if no variant exists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(Language, &str); N]> for LocalizedText {
    fn from(entries: [(Language, &str); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(l, t)| (l, t.to_string()))
                .collect(),
        )
    }
}

// ============================================================================
// Creative Entry
// ============================================================================

/// One creative in the self-hosted carousel. Static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeEntry {
    /// Stable identifier.
    pub name: String,
    /// Headline.
    pub title: LocalizedText,
    /// Body text.
    pub description: LocalizedText,
    /// Call-to-action label.
    pub button_text: LocalizedText,
    /// Link opened by the call to action.
    pub target_url: String,
    /// Creative image.
    pub image_url: String,
    /// How long this creative stays on screen.
    pub duration_seconds: u32,
    /// Whether the image is landscape-shaped.
    #[serde(default)]
    pub is_horizontal: bool,
}

impl CreativeEntry {
    /// Display duration.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }

    /// Checks that the creative can be played.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidCreative("empty name".to_string()));
        }
        if self.duration_seconds == 0 {
            return Err(CoreError::InvalidCreative(format!(
                "{}: duration must be positive",
                self.name
            )));
        }
        if self.title.is_empty() {
            return Err(CoreError::InvalidCreative(format!("{}: missing title", self.name)));
        }
        Ok(())
    }

    /// Sum of the display durations of `creatives`.
    pub fn total_duration(creatives: &[CreativeEntry]) -> Duration {
        creatives.iter().map(CreativeEntry::duration).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Host signal types: UI language and viewport geometry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Language
// ============================================================================

/// Supported UI languages (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Russian
    Ru,
    /// Ukrainian
    Uk,
    /// Spanish
    Es,
    /// Portuguese
    Pt,
    /// Turkish
    Tr,
    /// Indonesian
    Id,
}

impl Language {
    /// Language used when no source reports one.
    pub const FALLBACK: Language = Language::En;

    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[
            Self::En,
            Self::Ru,
            Self::Uk,
            Self::Es,
            Self::Pt,
            Self::Tr,
            Self::Id,
        ]
    }

    /// Returns the two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Uk => "uk",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Tr => "tr",
            Self::Id => "id",
        }
    }

    /// Parses a code leniently: case-insensitive, region tags stripped
    /// (`pt-BR`, `ru_RU`). Returns `None` outside the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::all().iter().find(|l| l.code() == base).copied()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CoreError::UnsupportedLanguage(s.to_string()))
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wide or square.
    Landscape,
}

impl Orientation {
    /// Returns true for portrait.
    pub fn is_portrait(self) -> bool {
        self == Self::Portrait
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Inner size of the host viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Inner width.
    pub width: u32,
    /// Inner height.
    pub height: u32,
}

impl ViewportSize {
    /// A typical phone held upright.
    pub const PORTRAIT: ViewportSize = ViewportSize::new(390, 844);
    /// The same phone rotated.
    pub const LANDSCAPE: ViewportSize = ViewportSize::new(844, 390);

    /// Creates a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Portrait iff strictly taller than wide.
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

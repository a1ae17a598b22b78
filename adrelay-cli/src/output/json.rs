//! JSON output formatting.

use adrelay_core::PremiumStatus;
use adrelay_store::{AppContext, Settings};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Output Types
// ============================================================================

/// Premium check output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(flatten)]
    pub status: &'a PremiumStatus,
}

/// Configuration output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput<'a> {
    pub settings_path: &'a Path,
    pub context_path: &'a Path,
    pub settings: &'a Settings,
    pub context: &'a AppContext,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a premium status.
    pub fn format_premium(&self, status: &PremiumStatus, user_id: Option<&str>) -> Result<String> {
        self.format(&PremiumOutput { user_id, status })
    }

    /// Formats the configuration.
    pub fn format_config(
        &self,
        settings_path: &Path,
        context_path: &Path,
        settings: &Settings,
        context: &AppContext,
    ) -> Result<String> {
        self.format(&ConfigOutput {
            settings_path,
            context_path,
            settings,
            context,
        })
    }
}

//! Persisted app context: the user's language and id.

use adrelay_core::{Language, LanguageSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::StoreError;
use crate::persistence::{default_context_path, load_json_or_default, save_json};

/// Values remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppContext {
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Opaque user id for the premium check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Last modification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppContext {
    /// Loads the context from `path`. Missing or corrupt files give an empty
    /// context.
    pub async fn load(path: &Path) -> Self {
        load_json_or_default(path).await
    }

    /// Loads the context from the default location.
    pub async fn load_default() -> Self {
        Self::load(&default_context_path()).await
    }

    /// Saves the context to `path`.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Context saved");
        Ok(())
    }

    /// Saves the context to the default location.
    pub async fn save_default(&self) -> Result<(), StoreError> {
        self.save(&default_context_path()).await
    }

    /// Sets the user id. A blank id clears it.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into().trim().to_string();
        self.user_id = (!user_id.is_empty()).then_some(user_id);
        self.touch();
    }

    /// Sets the language.
    pub fn set_language(&mut self, language: Option<Language>) {
        self.language = language;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl LanguageSource for AppContext {
    fn name(&self) -> &str {
        "context"
    }

    fn language(&self) -> Option<Language> {
        self.language
    }
}

//! Persistence round-trip and edge case tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::context::AppContext;
use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, load_json_or_default, save_json};
use crate::settings::{LogLevel, Settings, SettingsStore};
use adrelay_core::{Language, ProviderKind};
use adrelay_providers::{ProviderConfig, SdkProviderConfig};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("test.json");

    save_json(&nested, &serde_json::json!({"key": "value"})).await.unwrap();

    assert!(nested.exists());
    assert!(!nested.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_saved_files_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("adrelay");
    let file = dir.join("context.json");

    save_json(&file, &AppContext::default()).await.unwrap();

    let file_mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
    let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(dir_mode, 0o700);
}

#[tokio::test]
async fn test_load_missing_file_is_not_found() {
    let path = PathBuf::from("/nonexistent/adrelay/settings.json");

    let err = load_json::<Settings>(&path).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_load_or_default_on_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("context.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let ctx: AppContext = load_json_or_default(&path).await;
    assert_eq!(ctx, AppContext::default());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("state");

    ensure_dir(&dir).await.unwrap();
    ensure_dir(&dir).await.unwrap();

    assert!(dir.is_dir());
}

// ============================================================================
// Settings Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_settings_store_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let store = SettingsStore::load(path.clone()).await.unwrap();
    assert_eq!(store.get().await, Settings::default());

    store.set("api_base_url", "https://api.example.com").await.unwrap();
    store.set("log_level", "info").await.unwrap();
    store
        .set_provider_config(ProviderConfig::default().with_network(
            ProviderKind::Adsgram,
            SdkProviderConfig::new("int-5551"),
        ))
        .await;
    store.save().await.unwrap();

    let reloaded = SettingsStore::load(path).await.unwrap();
    let settings = reloaded.get().await;
    assert_eq!(settings.api_base_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(settings.log_level, LogLevel::Info);
    assert_eq!(
        settings
            .provider_config
            .network(ProviderKind::Adsgram)
            .map(|n| n.block_id.as_str()),
        Some("int-5551")
    );
}

#[tokio::test]
async fn test_corrupt_settings_are_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let result = SettingsStore::load(path).await;
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}

#[tokio::test]
async fn test_creatives_override_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let mut creatives = adrelay_providers::default_creatives();
    creatives.truncate(1);
    creatives[0].duration_seconds = 15;

    let settings = Settings {
        creatives: Some(creatives),
        ..Settings::default()
    };
    save_json(&path, &settings).await.unwrap();

    let loaded: Settings = load_json(&path).await.unwrap();
    assert_eq!(loaded.creatives().len(), 1);
    assert_eq!(loaded.creatives()[0].duration_seconds, 15);
}

// ============================================================================
// Context Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_context_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("context.json");

    let mut ctx = AppContext::load(&path).await;
    assert_eq!(ctx, AppContext::default());

    ctx.set_user_id("123456789");
    ctx.set_language(Some(Language::Tr));
    ctx.save(&path).await.unwrap();

    let loaded = AppContext::load(&path).await;
    assert_eq!(loaded, ctx);
}

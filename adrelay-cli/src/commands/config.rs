//! Config command - manage settings and saved context.

use adrelay_core::Language;
use adrelay_store::{default_context_path, AppContext, Settings, SettingsStore};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Change a setting.
    Set {
        /// One of: api_base_url, premium_timeout_secs, script_timeout_secs, log_level.
        key: String,
        /// New value (empty clears api_base_url).
        value: String,
    },

    /// Remember the user id for premium checks.
    SetUser {
        /// User id; empty to forget it.
        user_id: String,
    },

    /// Remember the UI language.
    SetLanguage {
        /// Language code, or "auto" to follow the locale.
        language: String,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await?,
        ConfigAction::Path => show_paths(cli, store)?,
        ConfigAction::Set { key, value } => {
            store
                .set(key, value)
                .await
                .with_context(|| format!("valid keys: {}", Settings::KEYS.join(", ")))?;
            store.save().await?;
            info!(key, "Setting updated");
            println!("{key} updated");
        }
        ConfigAction::SetUser { user_id } => {
            let mut context = AppContext::load_default().await;
            context.set_user_id(user_id.as_str());
            context.save_default().await?;
            match &context.user_id {
                Some(id) => println!("User id set to {id}"),
                None => println!("User id cleared"),
            }
        }
        ConfigAction::SetLanguage { language } => {
            let language = parse_language(language)?;
            let mut context = AppContext::load_default().await;
            context.set_language(language);
            context.save_default().await?;
            match language {
                Some(language) => println!("Language set to {language}"),
                None => println!("Language follows the locale"),
            }
        }
    }
    Ok(ExitCode::Success)
}

fn parse_language(value: &str) -> Result<Option<Language>> {
    if value.eq_ignore_ascii_case("auto") || value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(value.parse::<Language>()?))
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;
    let context = AppContext::load_default().await;

    match cli.format {
        OutputFormat::Text => {
            println!("AdRelay Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Backend:          {}",
                settings.api_base_url.as_deref().unwrap_or("(not set)")
            );
            println!("Premium timeout:  {}s", settings.premium_timeout_secs);
            println!("Script timeout:   {}s", settings.script_timeout_secs);
            println!("Log level:        {}", settings.log_level);
            println!(
                "Creatives:        {} ({})",
                settings.creatives().len(),
                if settings.creatives.is_some() { "custom" } else { "built-in" }
            );
            println!();
            println!("Networks:");
            if settings.provider_config.networks.is_empty() {
                println!("  (none configured)");
            }
            for (kind, network) in &settings.provider_config.networks {
                let debug = if network.debug { " [debug]" } else { "" };
                println!("  • {}: block {}{debug}", kind.display_name(), network.block_id);
            }
            println!();
            println!("User id:          {}", context.user_id.as_deref().unwrap_or("(not set)"));
            println!(
                "Language:         {}",
                context.language.map_or_else(|| "auto".to_string(), |l| l.to_string())
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format_config(
                store.path(),
                &default_context_path(),
                &settings,
                &context,
            )?;
            println!("{output}");
        }
    }
    Ok(())
}

fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let context_path = default_context_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Settings: {}", store.path().display());
            println!("Context:  {}", context_path.display());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = serde_json::json!({
                "settings": store.path(),
                "context": context_path,
            });
            println!("{}", formatter.format(&output)?);
        }
    }
    Ok(())
}

// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! AdRelay CLI - drive the rewarded-ad engine from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Watch one rewarded ad (carousel fallback in the terminal)
//! adrelay show
//!
//! # Short creatives, rotate the "device" after 2 seconds
//! adrelay show --fast --rotate-after 2
//!
//! # Check premium status for a user
//! adrelay --user-id 123456789 premium
//!
//! # List providers in priority order
//! adrelay providers --format json --pretty
//!
//! # Point at the backend
//! adrelay config set api_base_url https://api.example.com
//! ```

mod app;
mod commands;
mod host;
mod output;

use adrelay_store::{LogLevel, SettingsStore};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, premium, providers, show};

// ============================================================================
// CLI Definition
// ============================================================================

/// AdRelay CLI - rewarded-ad orchestration.
#[derive(Parser)]
#[command(name = "adrelay")]
#[command(about = "Rewarded-ad orchestration CLI")]
#[command(long_about = r#"
AdRelay decides how a player earns a reward: premium users skip ads,
everyone else gets the first available ad network, falling back to the
self-hosted creative carousel.

Providers, in priority order:
  • Adsgram (external SDK)
  • Monetag (not integrated)
  • RichAds (not integrated)
  • Carousel (self-hosted, portrait only)

Examples:
  adrelay show                       # Watch one rewarded ad
  adrelay show --rotate-after 5      # Interrupt by rotating to landscape
  adrelay premium --user-id 42       # Premium status
  adrelay providers                  # Provider states
"#)]
#[command(version)]
#[command(author = "AdRelay Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'show' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// User id for the premium check (overrides the saved one).
    #[arg(long, short, global = true)]
    pub user_id: Option<String>,

    /// UI language, e.g. "ru" or "pt-BR" (overrides the saved one).
    #[arg(long, short, global = true)]
    pub language: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one rewarded-ad flow (default if no command specified).
    #[command(visible_alias = "s")]
    Show(show::ShowArgs),

    /// Check premium status.
    Premium,

    /// List providers and their state.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The ad was not completed; no reward.
    NoReward = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("adrelay=debug,info")
    } else {
        EnvFilter::new(format!("adrelay={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings are read before logging starts so the saved level applies;
    // a load error is reported through the normal error path below.
    let store = SettingsStore::load_default().await;
    let level = match &store {
        Ok(store) => store.get().await.log_level,
        Err(_) => LogLevel::default(),
    };
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match store {
        Ok(store) => match &cli.command {
            Some(Commands::Show(args)) => show::run(args, &cli, &store).await,
            Some(Commands::Premium) => premium::run(&cli, &store).await,
            Some(Commands::Providers) => providers::run(&cli, &store).await,
            Some(Commands::Config(args)) => config::run(args, &cli, &store).await,
            None => show::run(&show::ShowArgs::default(), &cli, &store).await,
        },
        Err(e) => Err(anyhow::Error::new(e).context("failed to load settings")),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}

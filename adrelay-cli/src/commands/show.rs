//! Show command - run one rewarded-ad flow.

use adrelay_core::{CreativeEntry, ViewportSize};
use adrelay_fetch::{AdSurface, HeadlessSurface, Viewport};
use adrelay_store::SettingsStore;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::app::App;
use crate::host::TerminalSurface;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the show command.
#[derive(Args, Default)]
pub struct ShowArgs {
    /// Start with the viewport in landscape orientation.
    #[arg(long)]
    pub landscape: bool,

    /// Rotate the viewport to landscape after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub rotate_after: Option<u64>,

    /// Shorten every creative to one second.
    #[arg(long)]
    pub fast: bool,
}

/// Runs the show command.
pub async fn run(args: &ShowArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let mut app = App::load(cli, store).await?;
    if args.fast {
        app.settings.creatives = Some(shorten(app.settings.creatives()));
    }

    let viewport = if args.landscape {
        Viewport::landscape()
    } else {
        Viewport::portrait()
    };
    let surface: Arc<dyn AdSurface> = if cli.format == OutputFormat::Text && !cli.quiet {
        Arc::new(TerminalSurface::new(TextFormatter::new(!cli.no_color)))
    } else {
        Arc::new(HeadlessSurface::new())
    };

    let host = app.host(viewport.clone(), surface);
    let service = app.service(&host)?;
    service.initialize(None).await;

    if let Some(secs) = args.rotate_after {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            info!("Rotating viewport to landscape");
            viewport.resize(ViewportSize::LANDSCAPE);
        });
    }

    let result = service.show_rewarded_ad().await;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", TextFormatter::new(!cli.no_color).format_result(&result));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&result)?);
        }
    }

    Ok(if result.success {
        ExitCode::Success
    } else {
        ExitCode::NoReward
    })
}

fn shorten(creatives: Vec<CreativeEntry>) -> Vec<CreativeEntry> {
    creatives
        .into_iter()
        .map(|c| CreativeEntry {
            duration_seconds: 1,
            ..c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        let creatives = shorten(adrelay_providers::default_creatives());
        assert_eq!(CreativeEntry::total_duration(&creatives), Duration::from_secs(3));
    }
}

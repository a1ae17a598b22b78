//! Providers command - initialize and list providers.

use adrelay_fetch::{HeadlessSurface, Viewport};
use adrelay_store::SettingsStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the providers command.
pub async fn run(cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    info!("Listing providers");

    let app = App::load(cli, store).await?;
    let host = app.host(Viewport::portrait(), Arc::new(HeadlessSurface::new()));
    let service = app.service(&host)?;
    service.initialize(None).await;

    let info = service.provider_info();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(60));

            for provider in &info.providers {
                let active = provider.kind == info.active.kind;
                println!("{}", formatter.format_provider_line(provider, active));
            }

            println!();
            println!(
                "Total: {} providers ({} available)",
                info.providers.len(),
                info.providers.iter().filter(|p| p.available).count()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&info)?);
        }
    }

    Ok(ExitCode::Success)
}

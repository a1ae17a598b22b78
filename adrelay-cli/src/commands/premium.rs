//! Premium command - check entitlement.

use adrelay_fetch::{HeadlessSurface, Viewport};
use adrelay_store::SettingsStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the premium command.
pub async fn run(cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let app = App::load(cli, store).await?;
    let host = app.host(Viewport::portrait(), Arc::new(HeadlessSurface::new()));
    let checker = app.checker(&host)?;

    info!(user = ?checker.user_id(), "Checking premium status");
    let status = checker.check_status().await;

    match cli.format {
        OutputFormat::Text => {
            println!(
                "{}",
                TextFormatter::new(!cli.no_color).format_premium(&status, checker.user_id())
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_premium(&status, checker.user_id())?);
        }
    }

    Ok(ExitCode::Success)
}

#![windows_subsystem = "windows"]

use anyhow::Result;
use vaultdesk::{config::Config, gui};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment defaults; the GUI applies saved user settings on top
    let config = Config::from_env();
    tracing::info!(catalog = %config.catalog.label(), readiness = %config.readiness_mode, "starting vaultdesk");
    gui::launch(config)?;

    Ok(())
}

pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use crate::core::Session;
use crate::core::config::AppConfig;
use crate::providers::{bundled::BundledCatalog, mindicador::MindicadorProvider};
use tracing::{debug, info};

pub enum AppCommand {
    List,
    Convert {
        code: String,
        amount: Option<String>,
    },
}

/// Wires the live and local tiers described by `config` into a session.
pub fn build_session(config: &AppConfig) -> Result<Session> {
    let base_url = config.base_url();
    let local = match &config.local_catalog_path {
        Some(path) => BundledCatalog::from_path(path),
        None => BundledCatalog::embedded(),
    };

    Ok(Session::new(
        Box::new(MindicadorProvider::new(base_url)?),
        Box::new(local),
        Box::new(MindicadorProvider::new(base_url)?),
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Indicador starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut session = build_session(&config)?;

    match command {
        AppCommand::List => cli::catalog::run(&mut session).await,
        AppCommand::Convert { code, amount } => {
            cli::convert::run(&mut session, &code, amount.as_deref()).await
        }
    }
}

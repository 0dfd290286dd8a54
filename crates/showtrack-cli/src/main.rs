//! showtrack CLI - season progress and cloud account setup
//!
//! Renders season lists from JSON and drives the cloud setup flow against a
//! local session and settings file.

mod auth;
mod cli;
mod commands;
mod config;
mod error;
mod settings_store;
mod sync;

use clap::Parser;
use showtrack_core::seasons::LayoutDirection;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands, SeasonsCommands};
use crate::commands::cloud::run_cloud;
use crate::commands::config::{run_config_init, run_config_show};
use crate::commands::seasons::{run_seasons_diff, run_seasons_show};
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("showtrack=info,showtrack_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Seasons { command } => match command {
            SeasonsCommands::Show { path, rtl, json } => {
                let direction = if rtl {
                    LayoutDirection::Rtl
                } else {
                    config.layout
                };
                run_seasons_show(&path, direction, json)?;
            }
            SeasonsCommands::Diff { old, new, json } => run_seasons_diff(&old, &new, json)?,
        },
        Commands::Cloud { command } => run_cloud(command, &config).await?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(&config)?,
            ConfigCommands::Init { force } => run_config_init(cli.config.as_deref(), force)?,
        },
    }

    Ok(())
}

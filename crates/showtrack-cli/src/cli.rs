use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "showtrack")]
#[command(about = "Season progress and cloud account setup from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the CLI config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render season progress rows
    Seasons {
        #[command(subcommand)]
        command: SeasonsCommands,
    },
    /// Manage the cloud sync account
    Cloud {
        #[command(subcommand)]
        command: CloudCommands,
    },
    /// Inspect or create the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SeasonsCommands {
    /// Show one row per season from a JSON season list
    Show {
        /// JSON file holding the season list
        path: PathBuf,
        /// Lay out progress text right-to-left
        #[arg(long)]
        rtl: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the row changes between two season lists
    Diff {
        /// Season list currently displayed
        old: PathBuf,
        /// Season list to display next
        new: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum CloudCommands {
    /// Show the cloud account state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in and enable cloud sync
    Setup,
    /// Sign out and disable cloud sync
    SignOut,
    /// Delete the cloud account after confirmation
    RemoveAccount {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

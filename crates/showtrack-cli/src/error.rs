use std::io;

use showtrack_core::cloud::CloudSetupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] showtrack_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid season data: {0}")]
    InvalidSeasons(String),
    #[error("Cloud setup failed: {0}")]
    CloudSetup(#[from] CloudSetupError),
    #[error("Session error: {0}")]
    Session(String),
}

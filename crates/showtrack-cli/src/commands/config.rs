use std::path::{Path, PathBuf};

use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config_show(config: &CliConfig) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(config)?);
    println!("settings: {}", config.settings_path().display());
    println!("session: {}", config.session_path().display());
    Ok(())
}

pub fn run_config_init(explicit_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = explicit_path.map_or_else(default_config_path, Path::to_path_buf);
    let path = init_config(path, force)?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

pub fn init_config(path: PathBuf, force: bool) -> Result<PathBuf, CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists, pass --force to overwrite",
            path.display()
        )));
    }
    CliConfig::default().save_to_path(&path)?;
    Ok(path)
}

//! Persistent CLI configuration.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use showtrack_core::seasons::LayoutDirection;
use showtrack_core::util::{normalize_text_option, parse_flag};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const SETTINGS_FILE_NAME: &str = "cloud-settings.json";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub version: u32,
    /// Entitlement gate for cloud setup
    pub supporter_access: bool,
    pub layout: LayoutDirection,
    /// Where cloud settings and the sign-in session are kept
    pub data_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: 1,
            supporter_access: true,
            layout: LayoutDirection::Ltr,
            data_dir: None,
        }
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("showtrack")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

pub fn parse_layout(value: &str) -> Option<LayoutDirection> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ltr" => Some(LayoutDirection::Ltr),
        "rtl" => Some(LayoutDirection::Rtl),
        _ => None,
    }
}

impl CliConfig {
    /// Load the config file (explicit path or default) and apply
    /// `SHOWTRACK_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, CliError> {
        let path = explicit_path.map_or_else(default_config_path, Path::to_path_buf);
        let mut config = Self::load_from_path(&path)?;
        config.apply_overrides(
            env::var("SHOWTRACK_SUPPORTER_ACCESS").ok(),
            env::var("SHOWTRACK_LAYOUT").ok(),
            env::var("SHOWTRACK_DATA_DIR").ok(),
        )?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn apply_overrides(
        &mut self,
        supporter_access: Option<String>,
        layout: Option<String>,
        data_dir: Option<String>,
    ) -> Result<(), CliError> {
        if let Some(raw) = normalize_text_option(supporter_access) {
            self.supporter_access = parse_flag(&raw).ok_or_else(|| {
                CliError::Config(format!("SHOWTRACK_SUPPORTER_ACCESS is not a flag: {raw}"))
            })?;
        }
        if let Some(raw) = normalize_text_option(layout) {
            self.layout = parse_layout(&raw).ok_or_else(|| {
                CliError::Config(format!("SHOWTRACK_LAYOUT must be ltr or rtl, got {raw}"))
            })?;
        }
        if let Some(raw) = normalize_text_option(data_dir) {
            self.data_dir = Some(PathBuf::from(raw));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_config_dir)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE_NAME)
    }
}

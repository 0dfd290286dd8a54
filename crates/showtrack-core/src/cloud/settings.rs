//! In-memory cloud settings.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::AuthUser;

use super::ports::CloudSettings;

/// Plain cloud settings values. Used as-is for in-memory hosts and as the
/// serialized form of file-backed stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSettingsData {
    pub cloud_enabled: bool,
    pub should_validate_account: bool,
    pub account_name: Option<String>,
    pub setup_completed: bool,
}

impl Default for CloudSettingsData {
    fn default() -> Self {
        Self {
            cloud_enabled: false,
            should_validate_account: false,
            account_name: None,
            setup_completed: true,
        }
    }
}

impl CloudSettings for CloudSettingsData {
    fn is_cloud_enabled(&self) -> bool {
        self.cloud_enabled
    }

    fn should_validate_account(&self) -> bool {
        self.should_validate_account
    }

    fn account_name(&self) -> Option<String> {
        self.account_name.clone()
    }

    fn has_completed_setup(&self) -> bool {
        self.setup_completed
    }

    fn set_setup_incomplete(&mut self) -> Result<()> {
        self.setup_completed = false;
        Ok(())
    }

    fn set_setup_completed(&mut self) -> Result<()> {
        self.setup_completed = true;
        Ok(())
    }

    fn enable_cloud(&mut self, user: &AuthUser) -> Result<()> {
        self.account_name = Some(user.account_name());
        self.should_validate_account = false;
        self.cloud_enabled = true;
        Ok(())
    }

    fn disable_cloud(&mut self) -> Result<()> {
        self.cloud_enabled = false;
        Ok(())
    }

    fn remove_account(&mut self) -> Result<()> {
        self.cloud_enabled = false;
        self.should_validate_account = false;
        self.account_name = None;
        Ok(())
    }
}

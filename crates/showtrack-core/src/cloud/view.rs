//! Presentation state of the cloud setup screen.

use std::fmt;

use serde::Serialize;

use super::error::CloudSetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudDescription {
    Ready,
    /// A setup attempt did not finish
    SetupIncomplete,
}

/// What the primary button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudAction {
    SignIn,
    SignOut,
}

/// Message shown to the user until the next explicit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Interactive sign-in failed for lack of network.
    Offline,
    Error(CloudSetupError),
    /// Cloud is reserved to supporters.
    SubscriptionRequired,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => write!(f, "Could not sign in: you are offline"),
            Self::Error(CloudSetupError::AuthProvider { code }) => {
                write!(f, "Could not sign in: {code}")
            }
            Self::Error(CloudSetupError::AuthIncomplete) => write!(
                f,
                "Could not set up Cloud: your account does not provide an email address"
            ),
            Self::Error(error) => write!(f, "{error}"),
            Self::SubscriptionRequired => write!(f, "Cloud requires a supporter subscription"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudSetupView {
    pub account_name: Option<String>,
    pub description: CloudDescription,
    pub action: CloudAction,
    pub remove_account_visible: bool,
    /// An operation is outstanding; buttons are disabled meanwhile.
    pub progress_visible: bool,
    pub sync_status: Option<String>,
    pub notice: Option<Notice>,
}

impl CloudSetupView {
    pub const fn actions_enabled(&self) -> bool {
        !self.progress_visible
    }

    pub const fn description_text(&self) -> &'static str {
        match self.description {
            CloudDescription::Ready => {
                "Cloud keeps your shows, episodes and movies in sync across devices."
            }
            CloudDescription::SetupIncomplete => {
                "Cloud setup did not complete. Sign in again to retry."
            }
        }
    }
}

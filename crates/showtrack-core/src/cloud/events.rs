//! Messages delivered to the cloud setup controller.

use crate::models::AuthUser;

use super::controller::Ticket;
use super::error::ProviderFailure;

/// Result of an interactive sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveSignIn {
    SignedIn(AuthUser),
    /// The user closed the flow without signing in.
    Cancelled,
    Failed(ProviderFailure),
}

/// Result of the external account removal confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRemoval {
    Removed,
    Cancelled,
}

/// Latest state of the background sync, as published by the sync scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncProgress {
    Running { step: String },
    Finished,
    Failed { step: String, message: Option<String> },
}

impl SyncProgress {
    pub fn status_text(&self) -> String {
        match self {
            Self::Running { step } => format!("Syncing {step}..."),
            Self::Finished => "Sync finished".to_string(),
            Self::Failed {
                step,
                message: Some(message),
            } => format!("Sync failed at {step}: {message}"),
            Self::Failed { step, message: None } => format!("Sync failed at {step}"),
        }
    }
}

/// Everything that re-enters the controller after it handed work out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudSetupMessage {
    SilentSignInFinished {
        ticket: Ticket,
        result: Result<Option<AuthUser>, ProviderFailure>,
    },
    InteractiveSignInFinished {
        ticket: Ticket,
        outcome: InteractiveSignIn,
    },
    SignOutFinished {
        ticket: Ticket,
        result: Result<(), ProviderFailure>,
    },
    AccountRemovalFinished {
        ticket: Ticket,
        outcome: AccountRemoval,
    },
    SyncProgress(SyncProgress),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_progress_status_text() {
        assert_eq!(
            SyncProgress::Running {
                step: "shows".to_string()
            }
            .status_text(),
            "Syncing shows..."
        );
        assert_eq!(
            SyncProgress::Failed {
                step: "episodes".to_string(),
                message: Some("HTTP 503".to_string()),
            }
            .status_text(),
            "Sync failed at episodes: HTTP 503"
        );
    }
}

//! Local sign-in session for the CLI.
//!
//! The session file plays the role of cached device credentials: silent
//! sign-in restores it, interactive sign-in writes it, sign-out clears it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use showtrack_core::cloud::{
    AccountRemoval, AccountRemovalPrompt, AuthProvider, InteractiveSignIn, ProviderFailure,
};
use showtrack_core::util::normalize_text_option;
use showtrack_core::AuthUser;

use crate::error::CliError;

/// Provider code reported when the session file cannot be used.
pub const SESSION_STORE_ERROR_CODE: i32 = 8;

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Option<AuthUser>, CliError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map(Some).map_err(|error| {
            CliError::Session(format!(
                "Failed to parse session at {}: {error}",
                self.path.display()
            ))
        })
    }

    pub fn save(&self, user: &AuthUser) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CliError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Identity preset from `SHOWTRACK_ACCOUNT_*`, used instead of prompting.
pub fn account_from_env() -> Option<AuthUser> {
    account_from_values(
        std::env::var("SHOWTRACK_ACCOUNT_ID").ok(),
        std::env::var("SHOWTRACK_ACCOUNT_EMAIL").ok(),
        std::env::var("SHOWTRACK_ACCOUNT_NAME").ok(),
    )
}

pub fn account_from_values(
    id: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
) -> Option<AuthUser> {
    let email = normalize_text_option(email);
    // Without an explicit id the email doubles as the account id.
    let id = normalize_text_option(id).or_else(|| email.clone())?;
    Some(AuthUser {
        id,
        email,
        display_name: normalize_text_option(display_name),
    })
}

#[derive(Debug, Clone)]
pub struct LocalAuthProvider {
    session: SessionFile,
    preset: Option<AuthUser>,
}

impl LocalAuthProvider {
    pub const fn new(session: SessionFile, preset: Option<AuthUser>) -> Self {
        Self { session, preset }
    }

    async fn prompt_for_account() -> io::Result<Option<AuthUser>> {
        let line = read_line("Cloud account email (empty to cancel): ").await?;
        Ok(account_from_values(None, line, None))
    }
}

impl AuthProvider for LocalAuthProvider {
    fn current_user(&self) -> Option<AuthUser> {
        match self.session.load() {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!("Ignoring unreadable session: {error}");
                None
            }
        }
    }

    async fn silent_sign_in(&self) -> Result<Option<AuthUser>, ProviderFailure> {
        self.session.load().map_err(|error| {
            tracing::warn!("Silent sign-in failed: {error}");
            ProviderFailure::Code(SESSION_STORE_ERROR_CODE)
        })
    }

    async fn interactive_sign_in(&self) -> InteractiveSignIn {
        let account = match self.preset.clone() {
            Some(account) => Some(account),
            None => match Self::prompt_for_account().await {
                Ok(account) => account,
                Err(error) => {
                    tracing::warn!("Could not read account from stdin: {error}");
                    return InteractiveSignIn::Cancelled;
                }
            },
        };

        let Some(account) = account else {
            return InteractiveSignIn::Cancelled;
        };

        if let Err(error) = self.session.save(&account) {
            tracing::warn!("Could not store session: {error}");
            return InteractiveSignIn::Failed(ProviderFailure::Code(SESSION_STORE_ERROR_CODE));
        }
        InteractiveSignIn::SignedIn(account)
    }

    async fn sign_out(&self) -> Result<(), ProviderFailure> {
        self.session.clear().map_err(|error| {
            tracing::warn!("Could not clear session: {error}");
            ProviderFailure::Code(SESSION_STORE_ERROR_CODE)
        })
    }
}

/// Asks on stdin before the account gets removed.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRemovalPrompt {
    assume_yes: bool,
}

impl ConsoleRemovalPrompt {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl AccountRemovalPrompt for ConsoleRemovalPrompt {
    async fn confirm_removal(&self) -> AccountRemoval {
        if self.assume_yes {
            return AccountRemoval::Removed;
        }
        match read_line("Remove the cloud account and all synced data? [y/N] ").await {
            Ok(Some(answer)) if is_confirmation(&answer) => AccountRemoval::Removed,
            Ok(_) => AccountRemoval::Cancelled,
            Err(error) => {
                tracing::warn!("Could not read confirmation: {error}");
                AccountRemoval::Cancelled
            }
        }
    }
}

pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn read_line(prompt: &'static str) -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(normalize_text_option(Some(line)))
    })
    .await
    .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn account_from_values_falls_back_to_email_as_id() {
        let account =
            account_from_values(None, Some(" me@example.com ".to_string()), None).unwrap();
        assert_eq!(account.id, "me@example.com");
        assert_eq!(account.email.as_deref(), Some("me@example.com"));
        assert_eq!(account_from_values(Some("  ".to_string()), None, None), None);
    }

    #[test]
    fn confirmation_accepts_yes_only() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" YES\n"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("no"));
    }

    #[tokio::test]
    async fn preset_account_signs_in_and_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = SessionFile::new(&path);
        let preset = AuthUser::new("u1", Some("me@example.com".to_string()));
        let provider = LocalAuthProvider::new(session, Some(preset.clone()));

        assert_eq!(provider.current_user(), None);
        assert_eq!(provider.silent_sign_in().await, Ok(None));
        assert_eq!(
            provider.interactive_sign_in().await,
            InteractiveSignIn::SignedIn(preset.clone())
        );
        assert_eq!(provider.current_user(), Some(preset.clone()));
        assert_eq!(provider.silent_sign_in().await, Ok(Some(preset)));

        provider.sign_out().await.unwrap();
        assert!(!path.exists());
        assert_eq!(provider.current_user(), None);
    }

    #[tokio::test]
    async fn unreadable_session_fails_silent_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[]").unwrap();
        let provider = LocalAuthProvider::new(SessionFile::new(path), None);

        assert_eq!(provider.current_user(), None);
        assert_eq!(
            provider.silent_sign_in().await,
            Err(ProviderFailure::Code(SESSION_STORE_ERROR_CODE))
        );
    }

    #[tokio::test]
    async fn assumed_yes_confirms_removal() {
        assert_eq!(
            ConsoleRemovalPrompt::new(true).confirm_removal().await,
            AccountRemoval::Removed
        );
    }
}

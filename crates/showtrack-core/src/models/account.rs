//! Cloud account identity model

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;

/// Identity returned by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-scoped user id
    pub id: String,
    /// Account email, required to enable cloud sync
    #[serde(default)]
    pub email: Option<String>,
    /// Optional display name shown instead of the email
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AuthUser {
    #[must_use]
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
            display_name: None,
        }
    }

    /// Email with surrounding whitespace removed, `None` when blank.
    pub fn email(&self) -> Option<String> {
        normalize_text_option(self.email.clone())
    }

    pub fn has_email(&self) -> bool {
        self.email().is_some()
    }

    /// Name to show for the linked account.
    pub fn account_name(&self) -> String {
        normalize_text_option(self.display_name.clone())
            .or_else(|| self.email())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Snapshot of the cloud account as seen by the setup screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountState {
    pub signed_in: bool,
    pub identity: Option<AuthUser>,
    pub cloud_enabled: bool,
    pub setup_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_treated_as_missing() {
        let user = AuthUser::new("user", Some("   ".to_string()));
        assert!(!user.has_email());
        assert_eq!(user.account_name(), "user");
    }

    #[test]
    fn account_name_prefers_display_name() {
        let user = AuthUser {
            id: "user".to_string(),
            email: Some("user@example.com".to_string()),
            display_name: Some("Uwe".to_string()),
        };
        assert_eq!(user.account_name(), "Uwe");

        let user = AuthUser::new("user", Some(" user@example.com ".to_string()));
        assert_eq!(user.account_name(), "user@example.com");
    }
}

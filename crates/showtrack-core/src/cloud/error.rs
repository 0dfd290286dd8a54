//! Cloud setup error types

use thiserror::Error;

/// Why a cloud setup step did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudSetupError {
    /// The signed-in identity lacks an email address.
    #[error("Signed-in account has no email address")]
    AuthIncomplete,
    /// The authentication provider failed.
    #[error("Authentication provider error (code {code})")]
    AuthProvider { code: i32 },
    /// The user backed out of sign-in. Never shown.
    #[error("Sign-in cancelled")]
    UserCancelled,
    /// Credentials could not be stored; cloud stays disabled.
    #[error("Failed to store cloud credentials: {0}")]
    StorageCommitFailed(String),
}

/// Failure reported by the authentication provider.
///
/// `NoNetwork` and `UpdateCancelled` only differ from a plain provider code
/// in what the user gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    #[error("no network connection")]
    NoNetwork,
    /// The user declined a required update of the provider's services.
    #[error("provider update cancelled")]
    UpdateCancelled,
    #[error("provider error code {0}")]
    Code(i32),
}

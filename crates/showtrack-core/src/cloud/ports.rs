//! Collaborators of the cloud setup controller.

use std::future::Future;

use crate::error::Result;
use crate::models::AuthUser;

use super::error::{CloudSetupError, ProviderFailure};
use super::events::{AccountRemoval, InteractiveSignIn};

/// Authentication SDK used to link the device to the cloud account.
pub trait AuthProvider: Clone + Send + Sync + 'static {
    /// Identity already known to the provider, available without waiting.
    fn current_user(&self) -> Option<AuthUser>;

    /// Re-authenticate with cached device credentials, without user
    /// interaction. `Ok(None)` when there is nothing to restore.
    fn silent_sign_in(
        &self,
    ) -> impl Future<Output = std::result::Result<Option<AuthUser>, ProviderFailure>> + Send;

    fn interactive_sign_in(&self) -> impl Future<Output = InteractiveSignIn> + Send;

    fn sign_out(&self) -> impl Future<Output = std::result::Result<(), ProviderFailure>> + Send;
}

/// Confirmation flow shown before the cloud account gets removed.
pub trait AccountRemovalPrompt: Clone + Send + Sync + 'static {
    fn confirm_removal(&self) -> impl Future<Output = AccountRemoval> + Send;
}

/// Persisted cloud flags.
pub trait CloudSettings {
    fn is_cloud_enabled(&self) -> bool;

    /// The stored account needs to be signed in again before use.
    fn should_validate_account(&self) -> bool;

    fn account_name(&self) -> Option<String>;

    /// False after a setup attempt that did not finish.
    fn has_completed_setup(&self) -> bool;

    fn set_setup_incomplete(&mut self) -> Result<()>;

    fn set_setup_completed(&mut self) -> Result<()>;

    /// Reset sync state, store the account and enable cloud sync. Must leave
    /// cloud disabled when it fails.
    fn enable_cloud(&mut self, user: &AuthUser) -> Result<()>;

    fn disable_cloud(&mut self) -> Result<()>;

    /// Forget the account after it was removed from the backend.
    fn remove_account(&mut self) -> Result<()>;
}

/// Sync engine trigger.
pub trait SyncScheduler {
    /// Request a one-time full synchronization.
    fn request_full_sync(&mut self, immediate: bool);
}

/// Sink for failures worth investigating.
pub trait DiagnosticsSink {
    fn log_and_report(&self, action: &str, error: &CloudSetupError);
}

/// Reports through `tracing` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn log_and_report(&self, action: &str, error: &CloudSetupError) {
        tracing::error!(action, "Cloud setup failure: {}", error);
    }
}

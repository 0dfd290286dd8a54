//! State machine behind the cloud setup screen.

use tracing::{debug, info, warn};

use crate::models::{AccountState, AuthUser};

use super::error::{CloudSetupError, ProviderFailure};
use super::events::{AccountRemoval, CloudSetupMessage, InteractiveSignIn, SyncProgress};
use super::ports::{CloudSettings, DiagnosticsSink, SyncScheduler};
use super::view::{CloudAction, CloudDescription, CloudSetupView, Notice};
use super::ACTION_SIGN_IN;

/// Where the controller is in the setup flow.
///
/// `CheckingSilentAuth`, `SettingUp`, `SigningOut` and `RemovingAccount` are
/// busy phases: while one of them is current every other operation is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupPhase {
    /// Created, not started yet
    #[default]
    Idle,
    CheckingSilentAuth,
    SignedOut,
    SignedIn,
    /// Setup running, possibly waiting for interactive sign-in
    SettingUp,
    CloudEnabled,
    /// Signed in, but the last setup attempt did not finish
    SetupIncomplete,
    SigningOut,
    RemovingAccount,
}

impl SetupPhase {
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::CheckingSilentAuth | Self::SettingUp | Self::SigningOut | Self::RemovingAccount
        )
    }
}

/// Whether a view is attached to receive presentation updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    #[default]
    Attached,
    Detached,
}

/// Identifies one outstanding request. Completions carrying any other
/// ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Asynchronous work the host runs on behalf of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCommand {
    SilentSignIn,
    InteractiveSignIn,
    SignOut,
    ConfirmAccountRemoval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRequest {
    pub ticket: Ticket,
    pub command: AuthCommand,
}

/// Outcome of feeding an operation or completion to the controller.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Rejected or dropped; presentation state is unchanged.
    Ignored,
    /// Applied synchronously; re-render.
    Done,
    /// Applied; the host must run the request and report back.
    Pending(AuthRequest),
}

impl Step {
    pub const fn request(self) -> Option<AuthRequest> {
        match self {
            Self::Pending(request) => Some(request),
            Self::Ignored | Self::Done => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// The user may use cloud features. Without it setup only advertises the
    /// subscription.
    pub supporter_access: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            supporter_access: true,
        }
    }
}

/// Links the device to the cloud account.
///
/// All mutation goes through `&mut self`, so the controller must live on the
/// host's event loop; completions are delivered back to it as messages.
pub struct CloudSetupController<S, Y, D> {
    settings: S,
    scheduler: Y,
    diagnostics: D,
    options: ControllerOptions,
    phase: SetupPhase,
    attachment: Attachment,
    identity: Option<AuthUser>,
    notice: Option<Notice>,
    last_error: Option<CloudSetupError>,
    sync_progress: Option<SyncProgress>,
    pending: Option<Ticket>,
    next_ticket: u64,
}

impl<S, Y, D> CloudSetupController<S, Y, D>
where
    S: CloudSettings,
    Y: SyncScheduler,
    D: DiagnosticsSink,
{
    pub const fn new(
        settings: S,
        scheduler: Y,
        diagnostics: D,
        options: ControllerOptions,
    ) -> Self {
        Self {
            settings,
            scheduler,
            diagnostics,
            options,
            phase: SetupPhase::Idle,
            attachment: Attachment::Attached,
            identity: None,
            notice: None,
            last_error: None,
            sync_progress: None,
            pending: None,
            next_ticket: 0,
        }
    }

    pub const fn phase(&self) -> SetupPhase {
        self.phase
    }

    pub const fn attachment(&self) -> Attachment {
        self.attachment
    }

    pub const fn identity(&self) -> Option<&AuthUser> {
        self.identity.as_ref()
    }

    pub const fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub const fn scheduler(&self) -> &Y {
        &self.scheduler
    }

    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Failure of the most recent explicit action, including ones never
    /// shown to the user.
    pub const fn last_error(&self) -> Option<&CloudSetupError> {
        self.last_error.as_ref()
    }

    pub fn account_state(&self) -> AccountState {
        AccountState {
            signed_in: self.identity.is_some(),
            identity: self.identity.clone(),
            cloud_enabled: self.settings.is_cloud_enabled(),
            setup_complete: self.settings.has_completed_setup(),
        }
    }

    /// Current presentation state, `None` while no view is attached.
    pub fn view(&self) -> Option<CloudSetupView> {
        if self.attachment == Attachment::Detached {
            return None;
        }

        let ready = self.is_cloud_ready();
        let description = if ready || self.settings.has_completed_setup() {
            CloudDescription::Ready
        } else {
            CloudDescription::SetupIncomplete
        };

        Some(CloudSetupView {
            account_name: if ready {
                self.settings.account_name()
            } else {
                None
            },
            description,
            action: if ready {
                CloudAction::SignOut
            } else {
                CloudAction::SignIn
            },
            remove_account_visible: ready,
            progress_visible: self.phase.is_busy() || self.phase == SetupPhase::Idle,
            sync_status: self.sync_progress.as_ref().map(SyncProgress::status_text),
            notice: self.notice.clone(),
        })
    }

    /// The view became visible: adopt the provider's current user or start
    /// a silent sign-in.
    pub fn on_view_start(&mut self, cached: Option<AuthUser>) -> Step {
        if self.attachment == Attachment::Detached {
            self.attachment = Attachment::Attached;
            if self.phase.is_busy() {
                debug!(phase = ?self.phase, "Abandoning operation started by previous view");
                self.pending = None;
                self.phase = self.resting_phase();
            }
        }

        if self.phase.is_busy() {
            debug!(phase = ?self.phase, "Cloud setup busy, ignoring view start");
            return Step::Ignored;
        }

        if let Some(user) = cached {
            debug!("Got current cloud user");
            return self.change_account(Some(user), None);
        }

        debug!("Trying silent sign-in");
        self.issue(SetupPhase::CheckingSilentAuth, AuthCommand::SilentSignIn)
    }

    /// The view went away. Outstanding completions no longer touch
    /// presentation state.
    pub fn on_view_destroyed(&mut self) {
        self.attachment = Attachment::Detached;
        self.notice = None;
    }

    /// Sign in if needed, then store the account and enable cloud sync.
    pub fn begin_setup(&mut self) -> Step {
        if self.phase.is_busy() {
            debug!(phase = ?self.phase, "Cloud setup busy, ignoring setup request");
            return Step::Ignored;
        }

        if !self.options.supporter_access {
            self.notice = Some(Notice::SubscriptionRequired);
            return Step::Done;
        }

        self.notice = None;
        self.last_error = None;

        let Some(user) = self.identity.clone() else {
            return self.issue(SetupPhase::SettingUp, AuthCommand::InteractiveSignIn);
        };

        self.phase = SetupPhase::SettingUp;
        info!("Setting up cloud...");

        if let Err(error) = self.settings.set_setup_incomplete() {
            warn!("Failed to mark cloud setup incomplete: {}", error);
        }

        if !user.has_email() {
            debug!("Setting up cloud...FAILURE_AUTH");
            self.last_error = Some(CloudSetupError::AuthIncomplete);
            self.notice = Some(Notice::Error(CloudSetupError::AuthIncomplete));
        } else if let Err(error) = self.settings.enable_cloud(&user) {
            // Setup stays incomplete, the view offers to retry.
            warn!("Setting up cloud...FAILURE: {}", error);
            self.last_error = Some(CloudSetupError::StorageCommitFailed(error.to_string()));
        } else {
            debug!("Setting up cloud...SUCCESS_SYNC_REQUIRED");
            self.scheduler.request_full_sync(true);
            if let Err(error) = self.settings.set_setup_completed() {
                warn!("Failed to mark cloud setup completed: {}", error);
            }
        }

        self.phase = self.resting_phase();
        Step::Done
    }

    pub fn sign_out(&mut self) -> Step {
        if self.phase.is_busy() {
            debug!(phase = ?self.phase, "Cloud setup busy, ignoring sign-out");
            return Step::Ignored;
        }
        self.notice = None;
        self.issue(SetupPhase::SigningOut, AuthCommand::SignOut)
    }

    /// Hand account removal to the confirmation flow. Only offered while
    /// cloud is ready.
    pub fn remove_account(&mut self) -> Step {
        if self.phase.is_busy() {
            debug!(phase = ?self.phase, "Cloud setup busy, ignoring account removal");
            return Step::Ignored;
        }
        if !self.is_cloud_ready() {
            debug!(phase = ?self.phase, "Cloud not ready, nothing to remove");
            return Step::Ignored;
        }
        self.notice = None;
        self.issue(SetupPhase::RemovingAccount, AuthCommand::ConfirmAccountRemoval)
    }

    pub fn handle(&mut self, message: CloudSetupMessage) -> Step {
        match message {
            CloudSetupMessage::SilentSignInFinished { ticket, result } => {
                self.on_silent_sign_in_finished(ticket, result)
            }
            CloudSetupMessage::InteractiveSignInFinished { ticket, outcome } => {
                self.on_interactive_sign_in_finished(ticket, outcome)
            }
            CloudSetupMessage::SignOutFinished { ticket, result } => {
                self.on_sign_out_finished(ticket, result)
            }
            CloudSetupMessage::AccountRemovalFinished { ticket, outcome } => {
                self.on_account_removal_finished(ticket, outcome)
            }
            CloudSetupMessage::SyncProgress(progress) => self.on_sync_progress(progress),
        }
    }

    pub fn on_silent_sign_in_finished(
        &mut self,
        ticket: Ticket,
        result: Result<Option<AuthUser>, ProviderFailure>,
    ) -> Step {
        if !self.accept(ticket, SetupPhase::CheckingSilentAuth) {
            return Step::Ignored;
        }

        // Silent sign-in never shows errors, it only updates the view.
        let account = result.unwrap_or_else(|failure| {
            debug!("Silent sign-in failed: {}", failure);
            None
        });
        self.change_account(account, None)
    }

    pub fn on_interactive_sign_in_finished(
        &mut self,
        ticket: Ticket,
        outcome: InteractiveSignIn,
    ) -> Step {
        if !self.accept(ticket, SetupPhase::SettingUp) {
            return Step::Ignored;
        }

        match outcome {
            InteractiveSignIn::SignedIn(user) => self.change_account(Some(user), None),
            InteractiveSignIn::Cancelled
            | InteractiveSignIn::Failed(ProviderFailure::UpdateCancelled) => {
                self.last_error = Some(CloudSetupError::UserCancelled);
                self.change_account(None, None)
            }
            InteractiveSignIn::Failed(ProviderFailure::NoNetwork) => {
                self.change_account(None, Some(Notice::Offline))
            }
            InteractiveSignIn::Failed(ProviderFailure::Code(code)) => {
                let error = CloudSetupError::AuthProvider { code };
                self.diagnostics.log_and_report(ACTION_SIGN_IN, &error);
                self.last_error = Some(error.clone());
                self.change_account(None, Some(Notice::Error(error)))
            }
        }
    }

    /// Sign-out is best effort: identity and cloud flag are cleared whatever
    /// the provider says, even when the view is gone.
    pub fn on_sign_out_finished(
        &mut self,
        ticket: Ticket,
        result: Result<(), ProviderFailure>,
    ) -> Step {
        if let Err(failure) = result {
            warn!("Cloud sign-out failed: {}", failure);
        }
        info!("Signed out.");
        self.identity = None;
        self.disable_cloud();

        let current = self.pending == Some(ticket) && self.phase == SetupPhase::SigningOut;
        if current {
            self.pending = None;
            self.phase = self.resting_phase();
        }

        if !current || self.attachment == Attachment::Detached {
            return Step::Ignored;
        }
        Step::Done
    }

    pub fn on_account_removal_finished(&mut self, ticket: Ticket, outcome: AccountRemoval) -> Step {
        if !self.accept(ticket, SetupPhase::RemovingAccount) {
            return Step::Ignored;
        }

        match outcome {
            AccountRemoval::Removed => {
                info!("Cloud account removed");
                if let Err(error) = self.settings.remove_account() {
                    warn!("Failed to clear removed cloud account: {}", error);
                }
                self.identity = None;
                // Cached provider credentials must not outlive the account.
                self.issue(SetupPhase::SigningOut, AuthCommand::SignOut)
            }
            AccountRemoval::Cancelled => {
                debug!("Cloud account removal cancelled");
                self.phase = self.resting_phase();
                Step::Done
            }
        }
    }

    /// Latest sync progress wins. It is kept while detached so a returning
    /// view shows it.
    pub fn on_sync_progress(&mut self, progress: SyncProgress) -> Step {
        self.sync_progress = Some(progress);
        if self.attachment == Attachment::Detached {
            return Step::Ignored;
        }
        Step::Done
    }

    /// Store the sign-in result. Setup starts on its own when the user may
    /// use cloud but has not enabled it yet.
    fn change_account(&mut self, account: Option<AuthUser>, notice: Option<Notice>) -> Step {
        if let Some(user) = account {
            info!("Signed in to cloud account.");
            self.identity = Some(user);
        } else {
            self.identity = None;
            self.disable_cloud();
            if notice.is_some() {
                self.notice = notice;
            }
        }

        self.phase = self.resting_phase();

        if self.identity.is_some()
            && self.options.supporter_access
            && !self.settings.is_cloud_enabled()
        {
            info!("Auto-start cloud setup.");
            return self.begin_setup();
        }
        Step::Done
    }

    fn issue(&mut self, phase: SetupPhase, command: AuthCommand) -> Step {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(ticket);
        self.phase = phase;
        Step::Pending(AuthRequest { ticket, command })
    }

    /// Claim the outstanding request if `ticket` is it and a view is there
    /// to show the result.
    fn accept(&mut self, ticket: Ticket, expected: SetupPhase) -> bool {
        if self.attachment == Attachment::Detached {
            debug!(?ticket, "View detached, dropping completion");
            return false;
        }
        if self.pending != Some(ticket) || self.phase != expected {
            debug!(?ticket, phase = ?self.phase, "Dropping stale completion");
            return false;
        }
        self.pending = None;
        true
    }

    fn resting_phase(&self) -> SetupPhase {
        if self.identity.is_none() {
            SetupPhase::SignedOut
        } else if self.is_cloud_ready() {
            SetupPhase::CloudEnabled
        } else if !self.settings.has_completed_setup() {
            SetupPhase::SetupIncomplete
        } else {
            SetupPhase::SignedIn
        }
    }

    fn is_cloud_ready(&self) -> bool {
        self.settings.is_cloud_enabled() && !self.settings.should_validate_account()
    }

    fn disable_cloud(&mut self) {
        if let Err(error) = self.settings.disable_cloud() {
            warn!("Failed to disable cloud: {}", error);
        }
    }
}

//! Runs the controller's auth requests on tokio.

use tokio::sync::mpsc;

use super::controller::{
    Attachment, AuthCommand, AuthRequest, CloudSetupController, SetupPhase, Step,
};
use super::events::{CloudSetupMessage, SyncProgress};
use super::ports::{
    AccountRemovalPrompt, AuthProvider, CloudSettings, DiagnosticsSink, SyncScheduler,
};

/// Cloneable handle for publishing host events to a driver.
#[derive(Debug, Clone)]
pub struct CloudSetupSender {
    inner: mpsc::UnboundedSender<CloudSetupMessage>,
}

impl CloudSetupSender {
    /// Returns false once the driver is gone.
    pub fn sync_progress(&self, progress: SyncProgress) -> bool {
        self.send(CloudSetupMessage::SyncProgress(progress))
    }

    fn send(&self, message: CloudSetupMessage) -> bool {
        if self.inner.send(message).is_err() {
            tracing::debug!("Cloud setup driver dropped, discarding message");
            return false;
        }
        true
    }
}

/// Owns a [`CloudSetupController`] and executes its requests.
///
/// Requests run as tokio tasks; their results are queued on a channel and
/// only applied when the host calls [`CloudSetupDriver::handle`], so the
/// controller is only ever touched from the host loop. Results arriving
/// after the driver was dropped are discarded.
pub struct CloudSetupDriver<P, R, S, Y, D> {
    controller: CloudSetupController<S, Y, D>,
    provider: P,
    prompt: R,
    sender: CloudSetupSender,
    receiver: mpsc::UnboundedReceiver<CloudSetupMessage>,
}

impl<P, R, S, Y, D> CloudSetupDriver<P, R, S, Y, D>
where
    P: AuthProvider,
    R: AccountRemovalPrompt,
    S: CloudSettings,
    Y: SyncScheduler,
    D: DiagnosticsSink,
{
    pub fn new(controller: CloudSetupController<S, Y, D>, provider: P, prompt: R) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            controller,
            provider,
            prompt,
            sender: CloudSetupSender { inner: sender },
            receiver,
        }
    }

    pub const fn controller(&self) -> &CloudSetupController<S, Y, D> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CloudSetupController<S, Y, D> {
        &mut self.controller
    }

    pub fn into_controller(self) -> CloudSetupController<S, Y, D> {
        self.controller
    }

    pub fn sender(&self) -> CloudSetupSender {
        self.sender.clone()
    }

    pub fn start(&mut self) -> Step {
        let cached = self.provider.current_user();
        let step = self.controller.on_view_start(cached);
        self.dispatch(step)
    }

    pub fn begin_setup(&mut self) -> Step {
        let step = self.controller.begin_setup();
        self.dispatch(step)
    }

    pub fn sign_out(&mut self) -> Step {
        let step = self.controller.sign_out();
        self.dispatch(step)
    }

    pub fn remove_account(&mut self) -> Step {
        let step = self.controller.remove_account();
        self.dispatch(step)
    }

    pub fn detach(&mut self) {
        self.controller.on_view_destroyed();
    }

    /// Wait for the next queued completion or host event.
    pub async fn next_message(&mut self) -> Option<CloudSetupMessage> {
        self.receiver.recv().await
    }

    pub fn handle(&mut self, message: CloudSetupMessage) -> Step {
        let step = self.controller.handle(message);
        self.dispatch(step)
    }

    /// Apply messages until no operation is outstanding or the view is
    /// detached. Returns the phase the controller is in.
    pub async fn run_until_idle(&mut self) -> SetupPhase {
        while self.controller.phase().is_busy()
            && self.controller.attachment() == Attachment::Attached
        {
            let Some(message) = self.next_message().await else {
                break;
            };
            let _ = self.handle(message);
        }
        self.controller.phase()
    }

    fn dispatch(&self, step: Step) -> Step {
        if let Step::Pending(request) = step {
            self.spawn(request);
        }
        step
    }

    fn spawn(&self, request: AuthRequest) {
        let provider = self.provider.clone();
        let prompt = self.prompt.clone();
        let sender = self.sender.clone();
        let AuthRequest { ticket, command } = request;
        tracing::debug!(?command, "Running cloud auth request");

        tokio::spawn(async move {
            let message = match command {
                AuthCommand::SilentSignIn => CloudSetupMessage::SilentSignInFinished {
                    ticket,
                    result: provider.silent_sign_in().await,
                },
                AuthCommand::InteractiveSignIn => CloudSetupMessage::InteractiveSignInFinished {
                    ticket,
                    outcome: provider.interactive_sign_in().await,
                },
                AuthCommand::SignOut => CloudSetupMessage::SignOutFinished {
                    ticket,
                    result: provider.sign_out().await,
                },
                AuthCommand::ConfirmAccountRemoval => CloudSetupMessage::AccountRemovalFinished {
                    ticket,
                    outcome: prompt.confirm_removal().await,
                },
            };
            sender.send(message);
        });
    }
}

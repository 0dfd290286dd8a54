//! Cloud account setup.
//!
//! [`CloudSetupController`] owns the account state of the cloud setup screen.
//! It never performs asynchronous work itself: operations return a [`Step`],
//! and a pending step names the [`AuthCommand`] the host has to run. Results
//! come back through [`CloudSetupController::handle`]. [`CloudSetupDriver`]
//! does that plumbing on tokio for hosts that do not want to.

mod controller;
mod driver;
mod error;
mod events;
mod ports;
mod settings;
mod view;

pub use controller::{
    Attachment, AuthCommand, AuthRequest, CloudSetupController, ControllerOptions, SetupPhase,
    Step, Ticket,
};
pub use driver::{CloudSetupDriver, CloudSetupSender};
pub use error::{CloudSetupError, ProviderFailure};
pub use events::{AccountRemoval, CloudSetupMessage, InteractiveSignIn, SyncProgress};
pub use ports::{
    AccountRemovalPrompt, AuthProvider, CloudSettings, DiagnosticsSink, SyncScheduler,
    TracingDiagnostics,
};
pub use settings::CloudSettingsData;
pub use view::{CloudAction, CloudDescription, CloudSetupView, Notice};

/// Diagnostics action name for interactive sign-in failures.
pub const ACTION_SIGN_IN: &str = "sign-in";

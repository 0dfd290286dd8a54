use serde::Serialize;
use showtrack_core::cloud::{
    AccountRemovalPrompt, AuthProvider, CloudAction, CloudDescription, CloudSetupController,
    CloudSetupDriver, CloudSetupError, CloudSetupView, ControllerOptions, SetupPhase, Step,
    TracingDiagnostics,
};
use showtrack_core::AccountState;

use crate::auth::{account_from_env, ConsoleRemovalPrompt, LocalAuthProvider, SessionFile};
use crate::cli::CloudCommands;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::settings_store::JsonCloudSettings;
use crate::sync::ConsoleSyncScheduler;

pub type CliCloudController =
    CloudSetupController<JsonCloudSettings, ConsoleSyncScheduler, TracingDiagnostics>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudOperation {
    Status,
    Setup,
    SignOut,
    RemoveAccount,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CloudStatusItem {
    pub phase: String,
    pub signed_in: bool,
    pub cloud_enabled: bool,
    pub setup_complete: bool,
    pub account_name: Option<String>,
    pub description: CloudDescription,
    pub action: CloudAction,
    pub remove_account_available: bool,
    pub sync_status: Option<String>,
    pub notice: Option<String>,
}

pub fn cloud_status_item(
    phase: SetupPhase,
    state: &AccountState,
    view: &CloudSetupView,
) -> CloudStatusItem {
    CloudStatusItem {
        phase: format!("{phase:?}"),
        signed_in: state.signed_in,
        cloud_enabled: state.cloud_enabled,
        setup_complete: state.setup_complete,
        account_name: view.account_name.clone(),
        description: view.description,
        action: view.action,
        remove_account_available: view.remove_account_visible,
        sync_status: view.sync_status.clone(),
        notice: view.notice.as_ref().map(ToString::to_string),
    }
}

pub fn format_cloud_lines(state: &AccountState, view: &CloudSetupView) -> Vec<String> {
    let mut lines = Vec::new();

    let account = match (&view.account_name, &state.identity) {
        (Some(name), _) => name.clone(),
        (None, Some(identity)) => format!("{} (cloud not enabled)", identity.account_name()),
        (None, None) => "not signed in".to_string(),
    };
    lines.push(format!("Account: {account}"));
    lines.push(format!(
        "Cloud: {}",
        if state.cloud_enabled { "enabled" } else { "disabled" }
    ));
    lines.push(view.description_text().to_string());

    if let Some(status) = &view.sync_status {
        lines.push(format!("Sync: {status}"));
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("Notice: {notice}"));
    }

    let next = match view.action {
        CloudAction::SignIn => "showtrack cloud setup",
        CloudAction::SignOut => "showtrack cloud sign-out",
    };
    lines.push(format!("Next: {next}"));
    lines
}

/// Start the setup screen, run one operation and let every request finish.
pub async fn run_operation<P, R>(
    operation: CloudOperation,
    settings: JsonCloudSettings,
    provider: P,
    prompt: R,
    options: ControllerOptions,
) -> CliCloudController
where
    P: AuthProvider,
    R: AccountRemovalPrompt,
{
    let controller = CloudSetupController::new(
        settings,
        ConsoleSyncScheduler::default(),
        TracingDiagnostics,
        options,
    );
    let mut driver = CloudSetupDriver::new(controller, provider, prompt);

    let _ = driver.start();
    driver.run_until_idle().await;

    let already_enabled = driver.controller().account_state().cloud_enabled;
    let step = match operation {
        CloudOperation::Status => Step::Done,
        CloudOperation::Setup if already_enabled => {
            tracing::info!("Cloud already enabled, skipping setup");
            Step::Done
        }
        CloudOperation::Setup => driver.begin_setup(),
        CloudOperation::SignOut => driver.sign_out(),
        CloudOperation::RemoveAccount => driver.remove_account(),
    };
    if step == Step::Ignored {
        tracing::debug!(?operation, "Cloud operation not available");
    }

    driver.run_until_idle().await;
    driver.into_controller()
}

pub async fn run_cloud(command: CloudCommands, config: &CliConfig) -> Result<(), CliError> {
    let (operation, as_json, assume_yes) = match command {
        CloudCommands::Status { json } => (CloudOperation::Status, json, false),
        CloudCommands::Setup => (CloudOperation::Setup, false, false),
        CloudCommands::SignOut => (CloudOperation::SignOut, false, false),
        CloudCommands::RemoveAccount { yes } => (CloudOperation::RemoveAccount, false, yes),
    };

    let settings = JsonCloudSettings::open(config.settings_path())?;
    let provider = LocalAuthProvider::new(
        SessionFile::new(config.session_path()),
        account_from_env(),
    );
    let controller = run_operation(
        operation,
        settings,
        provider,
        ConsoleRemovalPrompt::new(assume_yes),
        ControllerOptions {
            supporter_access: config.supporter_access,
        },
    )
    .await;

    let state = controller.account_state();
    if let Some(view) = controller.view() {
        if as_json {
            let item = cloud_status_item(controller.phase(), &state, &view);
            println!("{}", serde_json::to_string_pretty(&item)?);
        } else {
            for line in controller.scheduler().report_lines() {
                println!("{line}");
            }
            for line in format_cloud_lines(&state, &view) {
                println!("{line}");
            }
        }
    }

    setup_result(operation, controller.last_error())
}

/// Setup failures become the command's error; a cancelled sign-in does not.
pub fn setup_result(
    operation: CloudOperation,
    last_error: Option<&CloudSetupError>,
) -> Result<(), CliError> {
    match (operation, last_error) {
        (CloudOperation::Setup, Some(CloudSetupError::UserCancelled)) => {
            println!("Sign-in cancelled.");
            Ok(())
        }
        (CloudOperation::Setup, Some(error)) => Err(error.clone().into()),
        _ => Ok(()),
    }
}

//! InvestUp command-line frontend.
//!
//! Each invocation restores the session from the identity provider, applies
//! one command through the dashboard controller and prints the screen the
//! controller ends up on.

pub mod bootstrap;
pub mod cli;
pub mod presenter;

use iu_app::{render, ControllerError, DashboardController, Screen};
use iu_core::SendForm;
use tracing::{info, info_span, Instrument};

use bootstrap::Wired;
use cli::{onboarding_form, Commands};

/// Runs one command against a freshly started controller.
///
/// Errors are already shown to the user through the notifier when this
/// returns them.
pub async fn run(command: Commands, wired: Wired) -> Result<Screen, ControllerError> {
    let controller = DashboardController::new(wired.deps, wired.settings);
    let span = info_span!("cli.run", command = command_name(&command));

    async {
        let state = controller.start().await?;
        info!(state = state.name(), "session restored");
        execute(&controller, command).await?;
        Ok(render(&controller.snapshot().await))
    }
    .instrument(span)
    .await
}

async fn execute(controller: &DashboardController, command: Commands) -> Result<(), ControllerError> {
    match command {
        Commands::Status => {}
        Commands::Login { role } => {
            controller.begin_login(role.map(Into::into)).await?;
        }
        Commands::Onboard {
            role,
            accept_terms,
            legal_name,
            country,
            phone,
            document_type,
            document_number,
        } => {
            let form = onboarding_form(
                role,
                accept_terms,
                legal_name,
                country,
                phone,
                document_type,
                document_number,
            );
            controller.update_onboarding(form).await?;
            controller.submit_onboarding().await?;
        }
        Commands::Refresh => {
            controller.refresh_balances().await?;
        }
        Commands::Send { to, amount } => {
            controller.open_send().await?;
            controller.update_send_form(SendForm::new(to, amount)).await;
            let record = controller.submit_transfer().await?;
            println!("{} (id {})", record.description, record.submission_id);
            controller.wait_for_pending_refresh().await;
        }
        Commands::Fund => {
            controller.open_funding().await?;
        }
        Commands::Withdraw => {
            controller.open_off_ramp().await?;
        }
        Commands::Logout => {
            controller.logout().await?;
        }
    }
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Status => "status",
        Commands::Login { .. } => "login",
        Commands::Onboard { .. } => "onboard",
        Commands::Refresh => "refresh",
        Commands::Send { .. } => "send",
        Commands::Fund => "fund",
        Commands::Withdraw => "withdraw",
        Commands::Logout => "logout",
    }
}

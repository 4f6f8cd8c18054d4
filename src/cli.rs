use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use iu_core::{DocumentType, OnboardingForm, Role};

#[derive(Debug, Parser)]
#[command(name = "investup")]
#[command(about = "InvestUp wallet dashboard for investors and entrepreneurs", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resulting screen as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current screen
    Status,
    /// Sign in, optionally picking a role for onboarding
    Login {
        #[arg(short, long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Complete the onboarding form
    Onboard {
        #[arg(short, long, value_enum)]
        role: RoleArg,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
        #[arg(long)]
        legal_name: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum)]
        document_type: Option<DocumentArg>,
        #[arg(long)]
        document_number: Option<String>,
    },
    /// Re-read wallet balances
    Refresh,
    /// Send tokens to another address
    Send {
        /// Recipient address (0x followed by 40 hex characters)
        #[arg(long)]
        to: String,
        /// Amount in token units, e.g. 12.5
        #[arg(long)]
        amount: String,
    },
    /// Print the link for adding funds
    Fund,
    /// Print the link for withdrawing funds
    Withdraw,
    /// Sign out and forget the cached role
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Investor,
    Entrepreneur,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Investor => Role::Investor,
            RoleArg::Entrepreneur => Role::Entrepreneur,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentArg {
    NationalId,
    Passport,
    ForeignerId,
}

impl From<DocumentArg> for DocumentType {
    fn from(value: DocumentArg) -> Self {
        match value {
            DocumentArg::NationalId => DocumentType::NationalId,
            DocumentArg::Passport => DocumentType::Passport,
            DocumentArg::ForeignerId => DocumentType::ForeignerId,
        }
    }
}

/// Builds a filled-in onboarding form from `onboard` arguments. The step is
/// derived from the filled fields once the form reaches the controller.
pub fn onboarding_form(
    role: RoleArg,
    accept_terms: bool,
    legal_name: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    document_type: Option<DocumentArg>,
    document_number: Option<String>,
) -> OnboardingForm {
    OnboardingForm {
        role: Some(role.into()),
        legal_name: legal_name.unwrap_or_default(),
        country: country.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        document_type: document_type.map(Into::into),
        document_number: document_number.unwrap_or_default(),
        accepted_terms: accept_terms,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send() {
        let cli = Cli::parse_from([
            "investup",
            "send",
            "--to",
            "0x1111111111111111111111111111111111111111",
            "--amount",
            "12.5",
        ]);
        match cli.command {
            Commands::Send { to, amount } => {
                assert_eq!(to, "0x1111111111111111111111111111111111111111");
                assert_eq!(amount, "12.5");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_onboard_maps_to_form() {
        let cli = Cli::parse_from([
            "investup",
            "--json",
            "onboard",
            "--role",
            "entrepreneur",
            "--accept-terms",
            "--document-type",
            "foreigner-id",
        ]);
        let Commands::Onboard {
            role,
            accept_terms,
            legal_name,
            country,
            phone,
            document_type,
            document_number,
        } = cli.command
        else {
            panic!("expected onboard");
        };

        let form = onboarding_form(
            role,
            accept_terms,
            legal_name,
            country,
            phone,
            document_type,
            document_number,
        );
        assert!(cli.json);
        assert_eq!(form.role, Some(Role::Entrepreneur));
        assert_eq!(form.document_type, Some(DocumentType::ForeignerId));
        assert!(form.is_complete());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Cli::try_parse_from(["investup", "login", "--role", "trader"]).is_err());
    }
}

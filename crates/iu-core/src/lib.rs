//! # iu-core
//!
//! Core domain models and business rules for InvestUp.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod balance;
pub mod config;
pub mod dashboard;
pub mod onboarding;
pub mod ports;
pub mod profile;
pub mod role;
pub mod session;
pub mod transfer;
pub mod wallet;

// Re-export commonly used types at the crate root
pub use balance::{BalanceSnapshot, TokenAmount};
pub use config::AppConfig;
pub use dashboard::{
    DashboardAction, DashboardEvent, DashboardState, DashboardStateMachine, DashboardView,
};
pub use onboarding::{DocumentType, OnboardingError, OnboardingForm, OnboardingStep};
pub use profile::UserProfile;
pub use role::Role;
pub use session::{AuthStatus, LinkedWallet, Session, UserId, WalletKind};
pub use transfer::{SendForm, TransferError, TransferRecord};
pub use wallet::{Erc20Token, NativeCurrency, SubmissionId, TransactionRequest};

pub use alloy_primitives::{Address, Bytes, U256};

//! Dashboard session domain module.
//!
//! This module defines the login/onboarding/dashboard state machine types.

pub mod state_machine;

pub use state_machine::{
    DashboardAction, DashboardEvent, DashboardState, DashboardStateMachine, DashboardView,
};

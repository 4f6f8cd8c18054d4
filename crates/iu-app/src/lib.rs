//! InvestUp Application Orchestration Layer
//!
//! This crate contains the use cases, the dashboard controller that drives
//! the session state machine, and the stateless view renderer.

pub mod controller;
pub mod deps;
pub mod usecases;
pub mod view;

pub use controller::{ControllerError, ControllerSettings, DashboardController};
pub use deps::AppDeps;
pub use view::{render, DashboardSnapshot, Screen};

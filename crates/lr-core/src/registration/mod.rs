//! Registration domain module.
//!
//! This module defines the geofence registration state machine types. The
//! machine is pure: it maps `(state, event)` to the next state plus the side
//! effects the application layer has to execute.

pub mod action;
pub mod event;
pub mod state;
pub mod state_machine;

pub use action::RegistrationAction;
pub use event::RegistrationEvent;
pub use state::{
    RegistrationFlow, RegistrationState, RemediationReason, SettingsFallback, TerminalOutcome,
};
pub use state_machine::RegistrationStateMachine;

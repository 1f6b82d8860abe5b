//! Location Reminders Application Orchestration Layer
//!
//! This crate contains the geofence registration use cases: the permission
//! gate, the location-settings resolver, the geofence registrar and the
//! registration controller that sequences them for the save screen and the
//! reminder list screen.

pub mod deps;
pub mod usecases;

pub use deps::RegistrationDeps;
pub use usecases::registration::{
    OrchestratorError, RegistrationController, ReminderListSession, SaveReminderSession,
};

//! # lr-core
//!
//! Core domain models and business logic for Location Reminders.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! reminder and geofence models, permission and location-settings vocabulary,
//! the registration state machine and the port traits implemented by the
//! platform and infrastructure layers.

// Public module exports
pub mod config;
pub mod geofence;
pub mod ids;
pub mod location;
pub mod ports;
pub mod registration;
pub mod reminder;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use geofence::{CallbackTarget, GeofenceSpec, GEOFENCE_EVENT_ACTION};
pub use ids::ReminderId;
pub use location::{PermissionState, PermissionTier, SettingsCheckOutcome, SettingsState};
pub use registration::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
};
pub use reminder::{Reminder, ValidationError};

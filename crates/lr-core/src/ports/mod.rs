//! Port interfaces for the application layer
//!
//! Ports define the contract between the registration use cases and the
//! platform/infrastructure implementations. Every platform operation is
//! asynchronous; results are returned as typed futures instead of being
//! demultiplexed from numeric request codes.

pub mod errors;
mod geofencing;
mod location_settings;
mod permission;
mod registration_ui;
mod reminder_repository;

pub use errors::{GeofencingError, PermissionError, ReminderRepositoryError, SettingsError};
pub use geofencing::GeofencingPort;
pub use location_settings::LocationSettingsPort;
pub use permission::PermissionPort;
pub use registration_ui::RegistrationUiPort;
pub use reminder_repository::ReminderRepositoryPort;

use thiserror::Error;

use crate::ids::ReminderId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderRepositoryError {
    #[error("reminder not found: {0}")]
    NotFound(ReminderId),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The pending request was dropped before the platform answered.
    #[error("permission request abandoned")]
    Abandoned,

    #[error("permission service error: {0}")]
    Platform(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("resolution flow could not be started: {0}")]
    ResolutionUnavailable(String),

    #[error("resolution abandoned")]
    Abandoned,

    #[error("location settings service error: {0}")]
    Platform(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeofencingError {
    #[error("geofence service not available")]
    NotAvailable,

    #[error("too many geofences registered")]
    TooManyGeofences,

    #[error("missing location permission")]
    PermissionMissing,

    #[error("geofencing service error: {0}")]
    Platform(String),
}

//! Dependency bundle for the registration use cases.

use std::sync::Arc;

use lr_core::ports::{
    GeofencingPort, LocationSettingsPort, PermissionPort, RegistrationUiPort,
    ReminderRepositoryPort,
};

/// Ports required by a registration session.
///
/// The platform ports are shared by every session; `ui` is usually specific
/// to the screen that owns the session.
#[derive(Clone)]
pub struct RegistrationDeps {
    pub permissions: Arc<dyn PermissionPort>,
    pub location_settings: Arc<dyn LocationSettingsPort>,
    pub geofencing: Arc<dyn GeofencingPort>,
    pub reminders: Arc<dyn ReminderRepositoryPort>,
    pub ui: Arc<dyn RegistrationUiPort>,
}

//! Business logic use cases
//!
//! Control flows strictly from the registration controller through the
//! permission gate and the settings resolver to the geofence registrar:
//!
//! RegistrationController
//!         ↓
//! PermissionGate          → platform permission prompt
//!         ↓
//! LocationSettingsResolver → platform resolution flow
//!         ↓
//! GeofenceRegistrar       → platform geofencing service

pub mod geofence_registrar;
pub mod permission_gate;
pub mod registration;
pub mod settings_resolver;

pub use geofence_registrar::{
    GeofenceRegistrar, RegistrationError, RegistrationFailure, RegistrationReport,
    RegistrationTicket,
};
pub use permission_gate::PermissionGate;
pub use settings_resolver::LocationSettingsResolver;

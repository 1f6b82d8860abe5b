//! Simulated platform services.
//!
//! In-process stand-ins for the device permission, location-settings and
//! geofencing services. User-facing flows (permission prompts, resolution
//! dialogs, the settings page) wait on the shared [`ResultRouter`] until the
//! driver delivers an answer by request code.
//!
//! [`ResultRouter`]: crate::result_router::ResultRouter

mod geofencing;
mod location_settings;
mod permission;
mod ui;

pub use geofencing::{GeofencingCall, SimulatedGeofencingClient, DEFAULT_MAX_GEOFENCES};
pub use location_settings::SimulatedLocationSettings;
pub use permission::SimulatedPermissionService;
pub use ui::TracingUi;

//! Location permission and location-settings vocabulary.

mod permission;
mod settings;

pub use permission::{PermissionState, PermissionTier};
pub use settings::{
    LocationPriority, LocationSettingsRequest, ResolutionHandle, ResolutionOutcome,
    SettingsCheckOutcome, SettingsState,
};

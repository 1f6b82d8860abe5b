//! Application configuration domain model

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geofence::DEFAULT_GEOFENCE_RADIUS_METERS;

/// Application configuration
///
/// Every section and field falls back to its default when missing from the
/// TOML source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub registration: RegistrationConfig,
    pub platform: PlatformConfig,
}

/// Registration pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Wait before re-checking location settings after a permission grant or
    /// a resolution, so the location subsystem can reacquire a fix.
    pub grace_delay_ms: u64,

    pub geofence_radius_meters: f32,

    /// Wait for geofence submission before leaving `Registering`.
    pub await_registration: bool,

    /// Explain a denied permission before requesting it on the save path.
    pub permission_rationale: bool,
}

/// Platform capability settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Whether the platform has a background-location permission distinct
    /// from foreground location.
    pub has_background_tier: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            grace_delay_ms: 1000,
            geofence_radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
            await_registration: false,
            permission_rationale: true,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            has_background_tier: true,
        }
    }
}

impl RegistrationConfig {
    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }
}

impl AppConfig {
    /// Maps a parsed TOML document onto the configuration.
    pub fn from_toml(value: &toml::Value) -> anyhow::Result<Self> {
        let config = value.clone().try_into::<AppConfig>()?;
        Ok(config)
    }
}

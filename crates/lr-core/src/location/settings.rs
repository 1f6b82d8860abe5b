use serde::{Deserialize, Serialize};

/// Accuracy/power profile of the location request submitted with a settings check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    Passive,
}

/// Settings-check query submitted to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSettingsRequest {
    pub priority: LocationPriority,
}

impl LocationSettingsRequest {
    /// Geofence monitoring only needs coarse fixes.
    pub fn low_power() -> Self {
        Self {
            priority: LocationPriority::LowPower,
        }
    }
}

/// Handle to a platform resolution flow, returned with a resolvable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionHandle(pub String);

/// Result of a settings check as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsCheckOutcome {
    Satisfied,
    /// The platform can fix the deficiency through user action.
    ResolvableFailure(ResolutionHandle),
    HardFailure { reason: String },
}

impl SettingsCheckOutcome {
    pub fn settings_state(&self) -> SettingsState {
        match self {
            Self::Satisfied => SettingsState::Satisfied,
            Self::ResolvableFailure(_) | Self::HardFailure { .. } => SettingsState::Unsatisfiable,
        }
    }
}

/// Adequacy of the device location service for geofence monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsState {
    Satisfied,
    Unsatisfiable,
    /// A resolution flow was launched and its outcome has not arrived yet.
    ResolutionPending,
}

/// Outcome of a resolution flow. The pipeline re-checks settings regardless
/// of the outcome, so this is only informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    Resolved,
    Declined,
}

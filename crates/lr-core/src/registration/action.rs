use serde::{Deserialize, Serialize};

use crate::location::{PermissionTier, ResolutionHandle};
use crate::registration::state::RemediationReason;
use crate::reminder::{Reminder, ValidationError};

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationAction {
    /// Validate the draft; answers with `ValidationPassed`/`ValidationFailed`.
    Validate { reminder: Reminder },
    ShowValidationError(ValidationError),

    /// Query the permission tier; answers with `PermissionChecked`.
    CheckPermission { tier: PermissionTier },
    /// Prompt for the permission; answers later with `PermissionResult`.
    RequestPermission { tier: PermissionTier },

    ShowRemediation(RemediationReason),
    DismissRemediation,
    /// Open the application's system settings page.
    OpenAppSettings,
    /// Set the list session's re-registration flag.
    AllowReRegistration,

    /// Query location settings, after the grace delay when `delayed`;
    /// answers with `SettingsChecked`.
    CheckSettings { delayed: bool },
    /// Launch the resolution flow; answers later with `ResolutionFinished`.
    LaunchResolution(ResolutionHandle),

    /// Read and clear the re-registration flag; answers with
    /// `ReRegistrationFlagConsumed`.
    ConsumeReRegistrationFlag,
    /// Submit a single geofence; answers with `RegistrationSubmitted`.
    RegisterOne { reminder: Reminder },
    /// Remove all geofences, then add one per stored reminder; answers with
    /// `RegistrationSubmitted`.
    RegisterAll,

    NavigateBack,
}

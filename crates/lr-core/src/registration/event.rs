use serde::{Deserialize, Serialize};

use crate::location::{PermissionState, PermissionTier, ResolutionOutcome, SettingsCheckOutcome};
use crate::reminder::{Reminder, ValidationError};

/// Events that drive the registration flow: user actions and platform results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationEvent {
    // User actions
    SaveRequested { reminder: Reminder },
    Resumed { re_registration_allowed: bool },
    RemediationAcknowledged,
    RemediationDismissed,

    // Results (from the executor)
    ValidationPassed,
    ValidationFailed { error: ValidationError },
    PermissionChecked { state: PermissionState },
    SettingsChecked { outcome: SettingsCheckOutcome },
    ReRegistrationFlagConsumed { allowed: bool },
    RegistrationSubmitted,

    // Results (from the platform, delivered asynchronously)
    PermissionResult {
        tier: PermissionTier,
        state: PermissionState,
    },
    ResolutionFinished { outcome: ResolutionOutcome },
    /// The platform dialog went away without an answer.
    PlatformFlowAbandoned,
}

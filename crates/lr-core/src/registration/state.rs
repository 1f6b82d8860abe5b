use serde::{Deserialize, Serialize};

use crate::location::{PermissionTier, SettingsState};
use crate::reminder::Reminder;

/// Which pipeline a state belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationFlow {
    /// Saving a single reminder from the edit screen.
    Save { reminder: Reminder },
    /// Bulk re-registration driven by the reminder list screen.
    Resume,
}

impl RegistrationFlow {
    pub fn is_resume(&self) -> bool {
        matches!(self, Self::Resume)
    }
}

/// Precondition explained by a remediation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemediationReason {
    PermissionDenied,
    LocationDisabled,
}

/// What happens when a settings check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsFallback {
    /// Launch the platform resolution flow if the failure is resolvable.
    ResolutionDialog,
    /// Give up and leave the screen.
    NavigateBack,
    /// Show a dismissible remediation prompt.
    RemediationPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalOutcome {
    Saved,
    Back,
}

/// Registration flow state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum RegistrationState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Save requested, draft under validation.
    Validating { reminder: Reminder },
    /// Querying the background permission tier.
    ///
    /// `recheck` is set when the check follows a permission request or a
    /// remediation the user acted on.
    PermissionCheck { flow: RegistrationFlow, recheck: bool },
    /// A remediation prompt is visible and waits for the user.
    AwaitingRemediation {
        flow: RegistrationFlow,
        reason: RemediationReason,
    },
    /// A platform permission prompt is outstanding.
    AwaitingPermission {
        flow: RegistrationFlow,
        tier: PermissionTier,
    },
    /// Querying the device location settings.
    SettingsCheck {
        flow: RegistrationFlow,
        fallback: SettingsFallback,
    },
    /// A platform resolution flow is outstanding.
    AwaitingResolution { flow: RegistrationFlow },
    /// Geofences are being submitted.
    Registering { flow: RegistrationFlow },
    Terminal(TerminalOutcome),
}

impl RegistrationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn flow(&self) -> Option<&RegistrationFlow> {
        match self {
            Self::PermissionCheck { flow, .. }
            | Self::AwaitingRemediation { flow, .. }
            | Self::AwaitingPermission { flow, .. }
            | Self::SettingsCheck { flow, .. }
            | Self::AwaitingResolution { flow }
            | Self::Registering { flow } => Some(flow),
            Self::Idle | Self::Validating { .. } | Self::Terminal(_) => None,
        }
    }

    /// Settings adequacy implied by the state, if the pipeline got that far.
    pub fn settings_state(&self) -> Option<SettingsState> {
        match self {
            Self::AwaitingResolution { .. } => Some(SettingsState::ResolutionPending),
            Self::AwaitingRemediation {
                reason: RemediationReason::LocationDisabled,
                ..
            } => Some(SettingsState::Unsatisfiable),
            Self::Registering { .. } | Self::Terminal(TerminalOutcome::Saved) => {
                Some(SettingsState::Satisfied)
            }
            _ => None,
        }
    }
}

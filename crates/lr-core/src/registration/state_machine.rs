//! Registration state machine.
//!
//! Defines a pure state transition function for the save pipeline and the
//! list-screen resume pipeline. Events that do not apply to the current state
//! leave it unchanged and produce no actions, which is how stale or duplicate
//! platform deliveries become no-ops.

use crate::location::{PermissionState, PermissionTier, SettingsCheckOutcome};
use crate::registration::action::RegistrationAction;
use crate::registration::event::RegistrationEvent;
use crate::registration::state::{
    RegistrationFlow, RegistrationState, RemediationReason, SettingsFallback, TerminalOutcome,
};

/// Background location implies foreground, so the pipeline only checks the
/// background tier.
const REQUIRED_TIER: PermissionTier = PermissionTier::Background;

/// Pure registration state machine.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationStateMachine {
    permission_rationale: bool,
}

impl Default for RegistrationStateMachine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RegistrationStateMachine {
    /// `permission_rationale` controls whether the save pipeline explains a
    /// denied permission with a remediation prompt before requesting it.
    pub fn new(permission_rationale: bool) -> Self {
        Self {
            permission_rationale,
        }
    }

    pub fn transition(
        &self,
        state: RegistrationState,
        event: RegistrationEvent,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        match (state, event) {
            // ===== Save =====
            (RegistrationState::Idle, RegistrationEvent::SaveRequested { reminder }) => (
                RegistrationState::Validating {
                    reminder: reminder.clone(),
                },
                vec![RegistrationAction::Validate { reminder }],
            ),
            (RegistrationState::Validating { reminder }, RegistrationEvent::ValidationPassed) => (
                RegistrationState::PermissionCheck {
                    flow: RegistrationFlow::Save { reminder },
                    recheck: false,
                },
                vec![RegistrationAction::CheckPermission {
                    tier: REQUIRED_TIER,
                }],
            ),
            (
                RegistrationState::Validating { .. },
                RegistrationEvent::ValidationFailed { error },
            ) => (
                RegistrationState::Idle,
                vec![RegistrationAction::ShowValidationError(error)],
            ),

            // ===== Resume =====
            (
                state,
                RegistrationEvent::Resumed {
                    re_registration_allowed,
                },
            ) if accepts_resume(&state) => (
                RegistrationState::PermissionCheck {
                    flow: RegistrationFlow::Resume,
                    recheck: re_registration_allowed,
                },
                vec![
                    RegistrationAction::DismissRemediation,
                    RegistrationAction::CheckPermission {
                        tier: REQUIRED_TIER,
                    },
                ],
            ),

            // ===== Permission =====
            (
                RegistrationState::PermissionCheck { flow, recheck },
                RegistrationEvent::PermissionChecked {
                    state: PermissionState::Granted,
                },
            ) => {
                let fallback = if flow.is_resume() {
                    SettingsFallback::RemediationPrompt
                } else {
                    SettingsFallback::ResolutionDialog
                };
                (
                    RegistrationState::SettingsCheck { flow, fallback },
                    vec![RegistrationAction::CheckSettings { delayed: recheck }],
                )
            }
            (
                RegistrationState::PermissionCheck { flow, recheck },
                RegistrationEvent::PermissionChecked {
                    state: PermissionState::Denied,
                },
            ) => self.on_permission_denied(flow, recheck),
            (
                RegistrationState::AwaitingPermission { flow, tier },
                RegistrationEvent::PermissionResult {
                    tier: result_tier, ..
                },
            ) if tier == result_tier => (
                RegistrationState::PermissionCheck {
                    flow,
                    recheck: true,
                },
                vec![RegistrationAction::CheckPermission {
                    tier: REQUIRED_TIER,
                }],
            ),

            // ===== Remediation =====
            (
                RegistrationState::AwaitingRemediation { flow, reason },
                RegistrationEvent::RemediationAcknowledged,
            ) => on_remediation_acknowledged(flow, reason),
            (
                RegistrationState::AwaitingRemediation { .. },
                RegistrationEvent::RemediationDismissed,
            ) => (RegistrationState::Idle, Vec::new()),

            // ===== Settings =====
            (
                RegistrationState::SettingsCheck { flow, fallback },
                RegistrationEvent::SettingsChecked { outcome },
            ) => on_settings_checked(flow, fallback, outcome),
            (
                RegistrationState::AwaitingResolution { flow },
                RegistrationEvent::ResolutionFinished { .. },
            ) => {
                let fallback = if flow.is_resume() {
                    SettingsFallback::RemediationPrompt
                } else {
                    SettingsFallback::NavigateBack
                };
                (
                    RegistrationState::SettingsCheck { flow, fallback },
                    vec![RegistrationAction::CheckSettings { delayed: true }],
                )
            }

            (
                RegistrationState::AwaitingPermission { .. }
                | RegistrationState::AwaitingResolution { .. },
                RegistrationEvent::PlatformFlowAbandoned,
            ) => (RegistrationState::Idle, Vec::new()),

            // ===== Registering =====
            (
                RegistrationState::Registering {
                    flow: RegistrationFlow::Resume,
                },
                RegistrationEvent::ReRegistrationFlagConsumed { allowed },
            ) => {
                if allowed {
                    (
                        RegistrationState::Registering {
                            flow: RegistrationFlow::Resume,
                        },
                        vec![RegistrationAction::RegisterAll],
                    )
                } else {
                    (RegistrationState::Idle, Vec::new())
                }
            }
            (
                RegistrationState::Registering {
                    flow: RegistrationFlow::Save { .. },
                },
                RegistrationEvent::RegistrationSubmitted,
            ) => (
                RegistrationState::Terminal(TerminalOutcome::Saved),
                vec![RegistrationAction::NavigateBack],
            ),
            (
                RegistrationState::Registering {
                    flow: RegistrationFlow::Resume,
                },
                RegistrationEvent::RegistrationSubmitted,
            ) => (RegistrationState::Idle, Vec::new()),

            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(state = ?state, event = ?_event, "registration event ignored");
                (state, Vec::new())
            }
        }
    }

    fn on_permission_denied(
        &self,
        flow: RegistrationFlow,
        recheck: bool,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        match flow {
            RegistrationFlow::Resume => (
                RegistrationState::AwaitingRemediation {
                    flow,
                    reason: RemediationReason::PermissionDenied,
                },
                vec![RegistrationAction::ShowRemediation(
                    RemediationReason::PermissionDenied,
                )],
            ),
            // The user already answered the platform prompt.
            RegistrationFlow::Save { .. } if recheck => (
                RegistrationState::Terminal(TerminalOutcome::Back),
                vec![RegistrationAction::NavigateBack],
            ),
            RegistrationFlow::Save { .. } if self.permission_rationale => (
                RegistrationState::AwaitingRemediation {
                    flow,
                    reason: RemediationReason::PermissionDenied,
                },
                vec![RegistrationAction::ShowRemediation(
                    RemediationReason::PermissionDenied,
                )],
            ),
            RegistrationFlow::Save { .. } => (
                RegistrationState::AwaitingPermission {
                    flow,
                    tier: REQUIRED_TIER,
                },
                vec![RegistrationAction::RequestPermission {
                    tier: REQUIRED_TIER,
                }],
            ),
        }
    }
}

fn accepts_resume(state: &RegistrationState) -> bool {
    match state {
        RegistrationState::Idle => true,
        RegistrationState::Validating { .. } | RegistrationState::Terminal(_) => false,
        other => other.flow().is_some_and(RegistrationFlow::is_resume),
    }
}

fn on_remediation_acknowledged(
    flow: RegistrationFlow,
    reason: RemediationReason,
) -> (RegistrationState, Vec<RegistrationAction>) {
    match (flow, reason) {
        (flow @ RegistrationFlow::Save { .. }, RemediationReason::PermissionDenied) => (
            RegistrationState::AwaitingPermission {
                flow,
                tier: REQUIRED_TIER,
            },
            vec![RegistrationAction::RequestPermission {
                tier: REQUIRED_TIER,
            }],
        ),
        // Coming back from the settings page resumes the list screen, which
        // runs the next pass.
        (RegistrationFlow::Resume, RemediationReason::PermissionDenied) => (
            RegistrationState::Idle,
            vec![
                RegistrationAction::AllowReRegistration,
                RegistrationAction::OpenAppSettings,
            ],
        ),
        (RegistrationFlow::Resume, RemediationReason::LocationDisabled) => (
            RegistrationState::SettingsCheck {
                flow: RegistrationFlow::Resume,
                fallback: SettingsFallback::ResolutionDialog,
            },
            vec![
                RegistrationAction::AllowReRegistration,
                RegistrationAction::CheckSettings { delayed: false },
            ],
        ),
        // The save pipeline never prompts about location settings.
        (flow @ RegistrationFlow::Save { .. }, reason @ RemediationReason::LocationDisabled) => (
            RegistrationState::AwaitingRemediation { flow, reason },
            Vec::new(),
        ),
    }
}

fn on_settings_checked(
    flow: RegistrationFlow,
    fallback: SettingsFallback,
    outcome: SettingsCheckOutcome,
) -> (RegistrationState, Vec<RegistrationAction>) {
    if outcome == SettingsCheckOutcome::Satisfied {
        return match flow {
            RegistrationFlow::Save { reminder } => (
                RegistrationState::Registering {
                    flow: RegistrationFlow::Save {
                        reminder: reminder.clone(),
                    },
                },
                vec![RegistrationAction::RegisterOne { reminder }],
            ),
            RegistrationFlow::Resume => (
                RegistrationState::Registering {
                    flow: RegistrationFlow::Resume,
                },
                vec![RegistrationAction::ConsumeReRegistrationFlag],
            ),
        };
    }

    match (fallback, outcome) {
        (SettingsFallback::ResolutionDialog, SettingsCheckOutcome::ResolvableFailure(handle)) => (
            RegistrationState::AwaitingResolution { flow },
            vec![RegistrationAction::LaunchResolution(handle)],
        ),
        // Not resolvable through user action: nothing left to try.
        (SettingsFallback::ResolutionDialog, _) => (RegistrationState::Idle, Vec::new()),
        (SettingsFallback::NavigateBack, _) => (
            RegistrationState::Terminal(TerminalOutcome::Back),
            vec![RegistrationAction::NavigateBack],
        ),
        (SettingsFallback::RemediationPrompt, _) => (
            RegistrationState::AwaitingRemediation {
                flow,
                reason: RemediationReason::LocationDisabled,
            },
            vec![RegistrationAction::ShowRemediation(
                RemediationReason::LocationDisabled,
            )],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{ResolutionHandle, ResolutionOutcome};
    use crate::reminder::{Reminder, ValidationError};

    fn reminder() -> Reminder {
        Reminder::draft().with_title("T").at("Park", 1.0, 2.0)
    }

    fn save_flow() -> RegistrationFlow {
        RegistrationFlow::Save {
            reminder: reminder(),
        }
    }

    fn machine() -> RegistrationStateMachine {
        RegistrationStateMachine::default()
    }

    #[test]
    fn save_requested_from_idle_validates() {
        let r = reminder();
        let (next, actions) = machine().transition(
            RegistrationState::Idle,
            RegistrationEvent::SaveRequested {
                reminder: r.clone(),
            },
        );
        assert_eq!(next, RegistrationState::Validating { reminder: r.clone() });
        assert_eq!(actions, vec![RegistrationAction::Validate { reminder: r }]);
    }

    #[test]
    fn validation_passed_moves_to_permission_check() {
        let r = reminder();
        let (next, actions) = machine().transition(
            RegistrationState::Validating { reminder: r.clone() },
            RegistrationEvent::ValidationPassed,
        );
        assert_eq!(
            next,
            RegistrationState::PermissionCheck {
                flow: RegistrationFlow::Save { reminder: r },
                recheck: false,
            }
        );
        assert_eq!(
            actions,
            vec![RegistrationAction::CheckPermission {
                tier: PermissionTier::Background
            }]
        );
    }

    #[test]
    fn validation_failed_returns_to_idle_with_error() {
        let (next, actions) = machine().transition(
            RegistrationState::Validating {
                reminder: reminder(),
            },
            RegistrationEvent::ValidationFailed {
                error: ValidationError::SelectLocation,
            },
        );
        assert_eq!(next, RegistrationState::Idle);
        assert_eq!(
            actions,
            vec![RegistrationAction::ShowValidationError(
                ValidationError::SelectLocation
            )]
        );
    }

    #[test]
    fn abandoned_platform_flow_returns_to_idle() {
        for state in [
            RegistrationState::AwaitingPermission {
                flow: save_flow(),
                tier: PermissionTier::Background,
            },
            RegistrationState::AwaitingResolution { flow: save_flow() },
        ] {
            let (next, actions) =
                machine().transition(state, RegistrationEvent::PlatformFlowAbandoned);
            assert_eq!(next, RegistrationState::Idle);
            assert!(actions.is_empty());
        }

        let (next, _) = machine().transition(
            RegistrationState::Idle,
            RegistrationEvent::SaveRequested {
                reminder: reminder(),
            },
        );
        assert!(matches!(next, RegistrationState::Validating { .. }));
    }

    #[test]
    fn abandoned_outside_platform_flow_is_ignored() {
        let state = RegistrationState::SettingsCheck {
            flow: save_flow(),
            fallback: SettingsFallback::ResolutionDialog,
        };
        let (next, actions) =
            machine().transition(state.clone(), RegistrationEvent::PlatformFlowAbandoned);
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn save_ignored_while_pipeline_in_flight() {
        let state = RegistrationState::SettingsCheck {
            flow: save_flow(),
            fallback: SettingsFallback::ResolutionDialog,
        };
        let (next, actions) = machine().transition(
            state.clone(),
            RegistrationEvent::SaveRequested {
                reminder: reminder(),
            },
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn denied_on_save_shows_rationale_then_requests() {
        let (next, actions) = machine().transition(
            RegistrationState::PermissionCheck {
                flow: save_flow(),
                recheck: false,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Denied,
            },
        );
        assert!(matches!(
            next,
            RegistrationState::AwaitingRemediation {
                reason: RemediationReason::PermissionDenied,
                ..
            }
        ));
        assert_eq!(
            actions,
            vec![RegistrationAction::ShowRemediation(
                RemediationReason::PermissionDenied
            )]
        );

        let (next, actions) =
            machine().transition(next, RegistrationEvent::RemediationAcknowledged);
        assert!(matches!(
            next,
            RegistrationState::AwaitingPermission {
                tier: PermissionTier::Background,
                ..
            }
        ));
        assert_eq!(
            actions,
            vec![RegistrationAction::RequestPermission {
                tier: PermissionTier::Background
            }]
        );
    }

    #[test]
    fn denied_on_save_without_rationale_requests_immediately() {
        let (next, actions) = RegistrationStateMachine::new(false).transition(
            RegistrationState::PermissionCheck {
                flow: save_flow(),
                recheck: false,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Denied,
            },
        );
        assert!(matches!(next, RegistrationState::AwaitingPermission { .. }));
        assert_eq!(
            actions,
            vec![RegistrationAction::RequestPermission {
                tier: PermissionTier::Background
            }]
        );
    }

    #[test]
    fn permission_result_reenters_permission_check_without_validation() {
        let flow = save_flow();
        let (next, actions) = machine().transition(
            RegistrationState::AwaitingPermission {
                flow: flow.clone(),
                tier: PermissionTier::Background,
            },
            RegistrationEvent::PermissionResult {
                tier: PermissionTier::Background,
                state: PermissionState::Granted,
            },
        );
        assert_eq!(
            next,
            RegistrationState::PermissionCheck {
                flow,
                recheck: true,
            }
        );
        assert_eq!(
            actions,
            vec![RegistrationAction::CheckPermission {
                tier: PermissionTier::Background
            }]
        );
    }

    #[test]
    fn permission_result_for_other_tier_is_ignored() {
        let state = RegistrationState::AwaitingPermission {
            flow: save_flow(),
            tier: PermissionTier::Background,
        };
        let (next, actions) = machine().transition(
            state.clone(),
            RegistrationEvent::PermissionResult {
                tier: PermissionTier::Foreground,
                state: PermissionState::Granted,
            },
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_permission_result_in_idle_is_noop() {
        let (next, actions) = machine().transition(
            RegistrationState::Idle,
            RegistrationEvent::PermissionResult {
                tier: PermissionTier::Background,
                state: PermissionState::Granted,
            },
        );
        assert_eq!(next, RegistrationState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn granted_after_request_delays_settings_check() {
        let (next, actions) = machine().transition(
            RegistrationState::PermissionCheck {
                flow: save_flow(),
                recheck: true,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Granted,
            },
        );
        assert!(matches!(
            next,
            RegistrationState::SettingsCheck {
                fallback: SettingsFallback::ResolutionDialog,
                ..
            }
        ));
        assert_eq!(actions, vec![RegistrationAction::CheckSettings { delayed: true }]);
    }

    #[test]
    fn first_settings_check_is_not_delayed() {
        let (_, actions) = machine().transition(
            RegistrationState::PermissionCheck {
                flow: save_flow(),
                recheck: false,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Granted,
            },
        );
        assert_eq!(actions, vec![RegistrationAction::CheckSettings { delayed: false }]);
    }

    #[test]
    fn denied_again_after_request_navigates_back() {
        let (next, actions) = machine().transition(
            RegistrationState::PermissionCheck {
                flow: save_flow(),
                recheck: true,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Denied,
            },
        );
        assert_eq!(next, RegistrationState::Terminal(TerminalOutcome::Back));
        assert_eq!(actions, vec![RegistrationAction::NavigateBack]);
    }

    #[test]
    fn resolvable_failure_launches_resolution_then_delayed_recheck() {
        let handle = ResolutionHandle("location-off".into());
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: save_flow(),
                fallback: SettingsFallback::ResolutionDialog,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::ResolvableFailure(handle.clone()),
            },
        );
        assert!(matches!(next, RegistrationState::AwaitingResolution { .. }));
        assert_eq!(actions, vec![RegistrationAction::LaunchResolution(handle)]);

        let (next, actions) = machine().transition(
            next,
            RegistrationEvent::ResolutionFinished {
                outcome: ResolutionOutcome::Resolved,
            },
        );
        assert!(matches!(
            next,
            RegistrationState::SettingsCheck {
                fallback: SettingsFallback::NavigateBack,
                ..
            }
        ));
        assert_eq!(actions, vec![RegistrationAction::CheckSettings { delayed: true }]);
    }

    #[test]
    fn hard_failure_without_handler_is_terminal_noop() {
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: save_flow(),
                fallback: SettingsFallback::ResolutionDialog,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::HardFailure {
                    reason: "unavailable".into(),
                },
            },
        );
        assert_eq!(next, RegistrationState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn recheck_failure_after_resolution_navigates_back() {
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: save_flow(),
                fallback: SettingsFallback::NavigateBack,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::ResolvableFailure(ResolutionHandle("x".into())),
            },
        );
        assert_eq!(next, RegistrationState::Terminal(TerminalOutcome::Back));
        assert_eq!(actions, vec![RegistrationAction::NavigateBack]);
    }

    #[test]
    fn satisfied_save_registers_one_then_saves() {
        let r = reminder();
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: RegistrationFlow::Save { reminder: r.clone() },
                fallback: SettingsFallback::ResolutionDialog,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::Satisfied,
            },
        );
        assert_eq!(actions, vec![RegistrationAction::RegisterOne { reminder: r }]);

        let (next, actions) = machine().transition(next, RegistrationEvent::RegistrationSubmitted);
        assert_eq!(next, RegistrationState::Terminal(TerminalOutcome::Saved));
        assert_eq!(actions, vec![RegistrationAction::NavigateBack]);
    }

    #[test]
    fn resume_dismisses_prompts_and_checks_permission() {
        let (next, actions) = machine().transition(
            RegistrationState::AwaitingRemediation {
                flow: RegistrationFlow::Resume,
                reason: RemediationReason::LocationDisabled,
            },
            RegistrationEvent::Resumed {
                re_registration_allowed: false,
            },
        );
        assert_eq!(
            next,
            RegistrationState::PermissionCheck {
                flow: RegistrationFlow::Resume,
                recheck: false,
            }
        );
        assert_eq!(
            actions,
            vec![
                RegistrationAction::DismissRemediation,
                RegistrationAction::CheckPermission {
                    tier: PermissionTier::Background
                },
            ]
        );
    }

    #[test]
    fn resume_ignored_during_save_pipeline() {
        let state = RegistrationState::AwaitingPermission {
            flow: save_flow(),
            tier: PermissionTier::Background,
        };
        let (next, actions) = machine().transition(
            state.clone(),
            RegistrationEvent::Resumed {
                re_registration_allowed: true,
            },
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn resume_denied_prompts_and_acknowledge_opens_settings() {
        let (next, actions) = machine().transition(
            RegistrationState::PermissionCheck {
                flow: RegistrationFlow::Resume,
                recheck: false,
            },
            RegistrationEvent::PermissionChecked {
                state: PermissionState::Denied,
            },
        );
        assert_eq!(
            actions,
            vec![RegistrationAction::ShowRemediation(
                RemediationReason::PermissionDenied
            )]
        );

        let (next, actions) = machine().transition(next, RegistrationEvent::RemediationAcknowledged);
        assert_eq!(next, RegistrationState::Idle);
        assert_eq!(
            actions,
            vec![
                RegistrationAction::AllowReRegistration,
                RegistrationAction::OpenAppSettings,
            ]
        );
    }

    #[test]
    fn resume_settings_failure_uses_prompt_instead_of_dialog() {
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: RegistrationFlow::Resume,
                fallback: SettingsFallback::RemediationPrompt,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::ResolvableFailure(ResolutionHandle("x".into())),
            },
        );
        assert_eq!(
            next,
            RegistrationState::AwaitingRemediation {
                flow: RegistrationFlow::Resume,
                reason: RemediationReason::LocationDisabled,
            }
        );
        assert_eq!(
            actions,
            vec![RegistrationAction::ShowRemediation(
                RemediationReason::LocationDisabled
            )]
        );

        let (next, actions) = machine().transition(next, RegistrationEvent::RemediationAcknowledged);
        assert_eq!(
            next,
            RegistrationState::SettingsCheck {
                flow: RegistrationFlow::Resume,
                fallback: SettingsFallback::ResolutionDialog,
            }
        );
        assert_eq!(
            actions,
            vec![
                RegistrationAction::AllowReRegistration,
                RegistrationAction::CheckSettings { delayed: false },
            ]
        );
    }

    #[test]
    fn resume_satisfied_consumes_flag_before_registering() {
        let (next, actions) = machine().transition(
            RegistrationState::SettingsCheck {
                flow: RegistrationFlow::Resume,
                fallback: SettingsFallback::RemediationPrompt,
            },
            RegistrationEvent::SettingsChecked {
                outcome: SettingsCheckOutcome::Satisfied,
            },
        );
        assert_eq!(actions, vec![RegistrationAction::ConsumeReRegistrationFlag]);

        let (not_allowed, actions) = machine().transition(
            next.clone(),
            RegistrationEvent::ReRegistrationFlagConsumed { allowed: false },
        );
        assert_eq!(not_allowed, RegistrationState::Idle);
        assert!(actions.is_empty());

        let (allowed, actions) = machine().transition(
            next,
            RegistrationEvent::ReRegistrationFlagConsumed { allowed: true },
        );
        assert_eq!(actions, vec![RegistrationAction::RegisterAll]);

        let (done, actions) = machine().transition(allowed, RegistrationEvent::RegistrationSubmitted);
        assert_eq!(done, RegistrationState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn terminal_state_absorbs_events() {
        let state = RegistrationState::Terminal(TerminalOutcome::Saved);
        let (next, actions) = machine().transition(
            state.clone(),
            RegistrationEvent::ResolutionFinished {
                outcome: ResolutionOutcome::Resolved,
            },
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }
}

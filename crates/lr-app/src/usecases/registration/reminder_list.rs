//! Reminder-list screen session.

use std::sync::Arc;

use lr_core::config::AppConfig;
use lr_core::registration::{RegistrationEvent, RegistrationState};
use tokio::sync::watch;

use crate::deps::RegistrationDeps;
use crate::usecases::geofence_registrar::RegistrationTicket;
use crate::usecases::registration::controller::{OrchestratorError, RegistrationController};

/// Registration session owned by the reminder list screen.
///
/// Every resume re-checks the permission and location settings. The full
/// reminder list is registered again only when both are satisfied and the
/// user acted on a remediation prompt since the previous read of the flag.
pub struct ReminderListSession {
    controller: Arc<RegistrationController>,
}

impl ReminderListSession {
    pub fn start(deps: RegistrationDeps, config: &AppConfig) -> Self {
        Self {
            controller: RegistrationController::start("reminder_list", deps, config),
        }
    }

    pub async fn on_resume(&self) -> Result<RegistrationState, OrchestratorError> {
        let re_registration_allowed = self.re_registration_allowed();
        self.controller
            .dispatch(RegistrationEvent::Resumed {
                re_registration_allowed,
            })
            .await
    }

    /// The user tapped the action button of the remediation prompt.
    pub async fn acknowledge_remediation(&self) -> Result<RegistrationState, OrchestratorError> {
        self.controller
            .dispatch(RegistrationEvent::RemediationAcknowledged)
            .await
    }

    pub async fn dismiss_remediation(&self) -> Result<RegistrationState, OrchestratorError> {
        self.controller
            .dispatch(RegistrationEvent::RemediationDismissed)
            .await
    }

    /// Current value of the re-registration flag, without clearing it.
    pub fn re_registration_allowed(&self) -> bool {
        self.controller.context().re_registration().is_allowed()
    }

    pub fn state(&self) -> RegistrationState {
        self.controller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.controller.subscribe()
    }

    pub fn take_registration(&self) -> Option<RegistrationTicket> {
        self.controller.take_registration()
    }

    pub fn close(&self) {
        self.controller.close();
    }

    pub fn is_closed(&self) -> bool {
        self.controller.is_closed()
    }
}

impl Drop for ReminderListSession {
    fn drop(&mut self) {
        self.controller.close();
    }
}

//! Save-reminder screen session.

use std::sync::Arc;

use lr_core::config::AppConfig;
use lr_core::registration::{RegistrationEvent, RegistrationState};
use lr_core::reminder::Reminder;
use tokio::sync::watch;

use crate::deps::RegistrationDeps;
use crate::usecases::geofence_registrar::RegistrationTicket;
use crate::usecases::registration::controller::{OrchestratorError, RegistrationController};

/// Registration session owned by the save-reminder screen.
///
/// A save runs validation, the permission and settings checks and a single
/// geofence registration, and ends in a terminal state. Saves requested while
/// one is in flight are ignored. Dropping the session closes it.
pub struct SaveReminderSession {
    controller: Arc<RegistrationController>,
}

impl SaveReminderSession {
    pub fn start(deps: RegistrationDeps, config: &AppConfig) -> Self {
        Self {
            controller: RegistrationController::start("save_reminder", deps, config),
        }
    }

    pub async fn save(&self, reminder: Reminder) -> Result<RegistrationState, OrchestratorError> {
        self.controller
            .dispatch(RegistrationEvent::SaveRequested { reminder })
            .await
    }

    /// The user accepted the permission prompt.
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

impl Drop for SaveReminderSession {
    fn drop(&mut self) {
        self.controller.close();
    }
}

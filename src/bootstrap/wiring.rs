//! # Dependency wiring
//!
//! Builds the platform services and the reminder store and hands them to
//! the registration sessions through their ports. This is the only place
//! that depends on `lr-app`, `lr-platform` and `lr-infra` together; it
//! assembles, it does not decide.

use std::sync::Arc;

use lr_app::{RegistrationDeps, ReminderListSession, SaveReminderSession};
use lr_core::config::AppConfig;
use lr_core::ports::RegistrationUiPort;
use lr_infra::InMemoryReminderRepository;
use lr_platform::{
    ResultRouter, SimulatedGeofencingClient, SimulatedLocationSettings,
    SimulatedPermissionService, TracingUi,
};
use tracing::info;

/// Platform services shared by every screen session.
pub struct PlatformServices {
    pub router: Arc<ResultRouter>,
    pub permissions: Arc<SimulatedPermissionService>,
    pub location_settings: Arc<SimulatedLocationSettings>,
    pub geofencing: Arc<SimulatedGeofencingClient>,
    pub reminders: Arc<InMemoryReminderRepository>,
    config: AppConfig,
}

impl PlatformServices {
    pub fn wire(config: AppConfig) -> Self {
        let router = Arc::new(ResultRouter::new());
        info!(
            grace_delay_ms = config.registration.grace_delay_ms,
            has_background_tier = config.platform.has_background_tier,
            "wiring platform services"
        );
        Self {
            permissions: Arc::new(SimulatedPermissionService::new(Arc::clone(&router))),
            location_settings: Arc::new(SimulatedLocationSettings::new(Arc::clone(&router))),
            geofencing: Arc::new(SimulatedGeofencingClient::default()),
            reminders: Arc::new(InMemoryReminderRepository::new()),
            router,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn deps(&self, ui: Arc<dyn RegistrationUiPort>) -> RegistrationDeps {
        RegistrationDeps {
            permissions: self.permissions.clone(),
            location_settings: self.location_settings.clone(),
            geofencing: self.geofencing.clone(),
            reminders: self.reminders.clone(),
            ui,
        }
    }

    /// Save-reminder session logging its screen effects.
    ///
    /// Must be called from within a tokio runtime.
    pub fn save_reminder_session(&self) -> SaveReminderSession {
        SaveReminderSession::start(
            self.deps(Arc::new(TracingUi::new("save_reminder"))),
            &self.config,
        )
    }

    /// Reminder-list session logging its screen effects.
    ///
    /// Must be called from within a tokio runtime.
    pub fn reminder_list_session(&self) -> ReminderListSession {
        ReminderListSession::start(
            self.deps(Arc::new(TracingUi::new("reminder_list"))),
            &self.config,
        )
    }
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use lr_app::RegistrationDeps;
use lr_core::ports::RegistrationUiPort;
use lr_core::registration::{RegistrationState, RemediationReason};
use lr_core::reminder::{Reminder, ValidationError};
use lr_infra::InMemoryReminderRepository;
use lr_platform::{
    ResultRouter, SimulatedGeofencingClient, SimulatedLocationSettings,
    SimulatedPermissionService,
};
use tokio::sync::watch;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Screen effect recorded by [`RecordingUi`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ValidationError(ValidationError),
    Remediation(RemediationReason),
    RemediationDismissed,
    ReRegistering(usize),
    NavigatedBack,
}

#[derive(Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
    states: Mutex<Vec<RegistrationState>>,
}

impl RecordingUi {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Effects other than prompt dismissals, which every resume emits.
    pub fn visible_events(&self) -> Vec<UiEvent> {
        self.events()
            .into_iter()
            .filter(|e| *e != UiEvent::RemediationDismissed)
            .collect()
    }

    pub fn states(&self) -> Vec<RegistrationState> {
        self.states.lock().unwrap().clone()
    }

    fn record(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait::async_trait]
impl RegistrationUiPort for RecordingUi {
    async fn show_validation_error(&self, error: ValidationError) -> anyhow::Result<()> {
        self.record(UiEvent::ValidationError(error));
        Ok(())
    }

    async fn show_remediation(&self, reason: RemediationReason) -> anyhow::Result<()> {
        self.record(UiEvent::Remediation(reason));
        Ok(())
    }

    async fn dismiss_remediation(&self) -> anyhow::Result<()> {
        self.record(UiEvent::RemediationDismissed);
        Ok(())
    }

    async fn notify_re_registering(&self, count: usize) -> anyhow::Result<()> {
        self.record(UiEvent::ReRegistering(count));
        Ok(())
    }

    async fn navigate_back(&self) -> anyhow::Result<()> {
        self.record(UiEvent::NavigatedBack);
        Ok(())
    }

    async fn state_changed(&self, state: &RegistrationState) {
        self.states.lock().unwrap().push(state.clone());
    }
}

/// Simulated platform wired the way the application wires the real one.
pub struct Harness {
    pub router: Arc<ResultRouter>,
    pub permissions: Arc<SimulatedPermissionService>,
    pub settings: Arc<SimulatedLocationSettings>,
    pub geofencing: Arc<SimulatedGeofencingClient>,
    pub reminders: Arc<InMemoryReminderRepository>,
    pub ui: Arc<RecordingUi>,
}

impl Harness {
    /// Permission not granted, device location on, no stored reminders.
    pub fn new() -> Self {
        init_tracing();
        let router = Arc::new(ResultRouter::new());
        Self {
            permissions: Arc::new(SimulatedPermissionService::new(Arc::clone(&router))),
            settings: Arc::new(SimulatedLocationSettings::new(Arc::clone(&router))),
            geofencing: Arc::new(SimulatedGeofencingClient::default()),
            reminders: Arc::new(InMemoryReminderRepository::new()),
            ui: Arc::new(RecordingUi::default()),
            router,
        }
    }

    pub fn with_reminders(mut self, reminders: Vec<Reminder>) -> Self {
        self.reminders = Arc::new(InMemoryReminderRepository::with_reminders(reminders));
        self
    }

    pub fn deps(&self) -> RegistrationDeps {
        RegistrationDeps {
            permissions: self.permissions.clone(),
            location_settings: self.settings.clone(),
            geofencing: self.geofencing.clone(),
            reminders: self.reminders.clone(),
            ui: self.ui.clone(),
        }
    }
}

pub fn reminder(title: &str) -> Reminder {
    Reminder::draft()
        .with_title(title)
        .with_description("pick up")
        .at("Corner shop", 52.37, 4.89)
}

/// Waits, with a generous timeout, until the session state matches.
pub async fn wait_for_state(
    rx: &mut watch::Receiver<RegistrationState>,
    predicate: impl FnMut(&RegistrationState) -> bool,
) -> RegistrationState {
    tokio::time::timeout(Duration::from_secs(30), rx.wait_for(predicate))
        .await
        .expect("state not reached in time")
        .expect("session state channel closed")
        .clone()
}

/// Lets spawned tasks run and pending timers fire.
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}

//! Geofence registrar.
//!
//! Converts reminders into geofences and submits them to the platform. Bulk
//! registration removes everything registered for the callback target first
//! and only starts adding once the removal has completed, so re-registering
//! an id never leaves two regions for it.
//!
//! Submission runs on a spawned task. The returned [`RegistrationTicket`] may
//! be dropped (fire-and-forget, outcome is still logged) or awaited for a
//! typed result.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lr_core::geofence::{CallbackTarget, GeofenceSpec, GeofenceSpecError};
use lr_core::ids::ReminderId;
use lr_core::ports::{GeofencingError, GeofencingPort, ReminderRepositoryError};
use lr_core::reminder::Reminder;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

/// One failed step of a registration pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationFailure {
    #[error("removing previous geofences failed: {0}")]
    Remove(GeofencingError),
    #[error("adding geofence {id} failed: {error}")]
    Add { id: ReminderId, error: GeofencingError },
    #[error(transparent)]
    InvalidReminder(#[from] GeofenceSpecError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("geofence registration failed: {}", summarize(.0))]
    Failed(Vec<RegistrationFailure>),
    #[error("loading reminders failed: {0}")]
    LoadReminders(#[from] ReminderRepositoryError),
    #[error("registration task aborted: {0}")]
    Aborted(String),
}

fn summarize(failures: &[RegistrationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a registration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReport {
    /// Whether the pass started with a remove call.
    pub removed_previous: bool,
    pub added: Vec<ReminderId>,
    pub failures: Vec<RegistrationFailure>,
    pub completed_at: DateTime<Utc>,
}

impl RegistrationReport {
    /// A pass that had nothing to register.
    pub fn empty() -> Self {
        Self {
            removed_previous: false,
            added: Vec::new(),
            failures: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_result(self) -> Result<Self, RegistrationError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RegistrationError::Failed(self.failures))
        }
    }
}

enum TicketInner {
    Pending(JoinHandle<Result<RegistrationReport, RegistrationError>>),
    Ready(Result<RegistrationReport, RegistrationError>),
}

/// Handle to a registration pass running in the background.
pub struct RegistrationTicket {
    inner: TicketInner,
}

impl RegistrationTicket {
    /// Spawns `pass` and logs its outcome when it completes.
    pub fn spawn<F>(label: &'static str, pass: F) -> Self
    where
        F: Future<Output = Result<RegistrationReport, RegistrationError>> + Send + 'static,
    {
        let span = info_span!("usecase.geofence_registrar.pass", pass = label);
        let handle = tokio::spawn(
            async move {
                let result = pass.await;
                match &result {
                    Ok(report) => info!(added = report.added.len(), "geofence registration completed"),
                    Err(err) => warn!(error = %err, "geofence registration failed"),
                }
                result
            }
            .instrument(span),
        );
        Self {
            inner: TicketInner::Pending(handle),
        }
    }

    pub fn ready(result: Result<RegistrationReport, RegistrationError>) -> Self {
        Self {
            inner: TicketInner::Ready(result),
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.inner {
            TicketInner::Pending(handle) => handle.is_finished(),
            TicketInner::Ready(_) => true,
        }
    }

    pub async fn wait(self) -> Result<RegistrationReport, RegistrationError> {
        match self.inner {
            TicketInner::Ready(result) => result,
            TicketInner::Pending(handle) => match handle.await {
                Ok(result) => result,
                Err(err) => Err(RegistrationError::Aborted(err.to_string())),
            },
        }
    }
}

#[derive(Clone)]
pub struct GeofenceRegistrar {
    port: Arc<dyn GeofencingPort>,
    target: CallbackTarget,
    radius_meters: f32,
}

impl GeofenceRegistrar {
    pub fn new(port: Arc<dyn GeofencingPort>, target: CallbackTarget, radius_meters: f32) -> Self {
        Self {
            port,
            target,
            radius_meters,
        }
    }

    /// Replaces every registered geofence with one per reminder, in the background.
    pub fn register(&self, reminders: Vec<Reminder>) -> RegistrationTicket {
        let this = self.clone();
        RegistrationTicket::spawn("register", async move {
            this.register_now(&reminders).await.into_result()
        })
    }

    /// Adds the geofence of a newly saved reminder, in the background.
    pub fn register_one(&self, reminder: Reminder) -> RegistrationTicket {
        let this = self.clone();
        RegistrationTicket::spawn("register_one", async move {
            this.register_one_now(&reminder).await.into_result()
        })
    }

    /// Remove-then-add pass. Adds run once the remove has completed, whether
    /// it succeeded or not.
    pub async fn register_now(&self, reminders: &[Reminder]) -> RegistrationReport {
        let mut report = RegistrationReport::empty();

        match self.port.remove(&self.target).await {
            Ok(()) => debug!(target = self.target.action(), "previous geofences removed"),
            Err(error) => {
                warn!(error = %error, "removing previous geofences failed");
                report.failures.push(RegistrationFailure::Remove(error));
            }
        }
        report.removed_previous = true;

        for reminder in reminders {
            self.add(reminder, &mut report).await;
        }

        report.completed_at = Utc::now();
        report
    }

    pub async fn register_one_now(&self, reminder: &Reminder) -> RegistrationReport {
        let mut report = RegistrationReport::empty();
        self.add(reminder, &mut report).await;
        report.completed_at = Utc::now();
        report
    }

    async fn add(&self, reminder: &Reminder, report: &mut RegistrationReport) {
        let spec = match GeofenceSpec::from_reminder_with_radius(reminder, self.radius_meters) {
            Ok(spec) => spec,
            Err(err) => {
                warn!(reminder_id = %reminder.id, error = %err, "skipping reminder without geofence");
                report.failures.push(err.into());
                return;
            }
        };

        match self.port.add(&spec, &self.target).await {
            Ok(()) => {
                debug!(request_id = %spec.request_id, "geofence added");
                report.added.push(spec.request_id);
            }
            Err(error) => {
                warn!(request_id = %spec.request_id, error = %error, "adding geofence failed");
                report.failures.push(RegistrationFailure::Add {
                    id: spec.request_id,
                    error,
                });
            }
        }
    }
}

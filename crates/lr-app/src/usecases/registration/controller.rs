//! Registration controller.
//!
//! Drives the registration state machine for one screen session and executes
//! the actions it emits. Quick actions run inline and feed their result back
//! into the same dispatch. Long-running platform operations (permission
//! prompts, resolution flows, delayed settings re-checks) run on spawned
//! tasks that post their result to the session's event pump.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use lr_core::config::AppConfig;
use lr_core::geofence::CallbackTarget;
use lr_core::location::{PermissionState, ResolutionOutcome};
use lr_core::ports::{PermissionError, RegistrationUiPort, ReminderRepositoryPort, SettingsError};
use lr_core::registration::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
};
use lr_core::reminder::validate;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::deps::RegistrationDeps;
use crate::usecases::geofence_registrar::{
    GeofenceRegistrar, RegistrationReport, RegistrationTicket,
};
use crate::usecases::permission_gate::PermissionGate;
use crate::usecases::registration::context::RegistrationContext;
use crate::usecases::settings_resolver::LocationSettingsResolver;

/// Errors produced by the registration controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestratorError {
    #[error("registration session is closed")]
    SessionClosed,
}

/// Result posted by a spawned task, tagged with the pass that started it.
#[derive(Debug)]
struct PostedEvent {
    pass: u64,
    event: RegistrationEvent,
}

pub struct RegistrationController {
    session: &'static str,
    context: Arc<RegistrationContext>,
    machine: RegistrationStateMachine,
    gate: PermissionGate,
    resolver: LocationSettingsResolver,
    registrar: GeofenceRegistrar,
    reminders: Arc<dyn ReminderRepositoryPort>,
    ui: Arc<dyn RegistrationUiPort>,
    await_registration: bool,
    events: mpsc::UnboundedSender<PostedEvent>,
    last_registration: Mutex<Option<RegistrationTicket>>,
}

impl RegistrationController {
    /// Builds the controller and starts its event pump.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(session: &'static str, deps: RegistrationDeps, config: &AppConfig) -> Arc<Self> {
        let (events, rx) = mpsc::unbounded_channel();
        let registration = &config.registration;

        let controller = Arc::new(Self {
            session,
            context: Arc::new(RegistrationContext::default()),
            machine: RegistrationStateMachine::new(registration.permission_rationale),
            gate: PermissionGate::new(deps.permissions, config.platform.has_background_tier),
            resolver: LocationSettingsResolver::new(
                deps.location_settings,
                registration.grace_delay(),
            ),
            registrar: GeofenceRegistrar::new(
                deps.geofencing,
                CallbackTarget::geofence_events(),
                registration.geofence_radius_meters,
            ),
            reminders: deps.reminders,
            ui: deps.ui,
            await_registration: registration.await_registration,
            events,
            last_registration: Mutex::new(None),
        });

        let token = controller.context.token().clone();
        let span = info_span!("usecase.registration.pump", session);
        tokio::spawn(run_pump(Arc::downgrade(&controller), token, rx).instrument(span));

        debug!(session, "registration controller started");
        controller
    }

    pub fn context(&self) -> &Arc<RegistrationContext> {
        &self.context
    }

    pub fn state(&self) -> RegistrationState {
        self.context.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.context.subscribe()
    }

    /// Takes the handle of the most recent geofence submission, if any.
    pub fn take_registration(&self) -> Option<RegistrationTicket> {
        self.last_registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Cancels outstanding platform operations. Results delivered afterwards
    /// are dropped and further dispatches fail with
    /// [`OrchestratorError::SessionClosed`].
    pub fn close(&self) {
        if !self.context.is_closed() {
            info!(session = self.session, "registration session closed");
            self.context.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.context.is_closed()
    }

    pub async fn dispatch(
        &self,
        event: RegistrationEvent,
    ) -> Result<RegistrationState, OrchestratorError> {
        // Acquire dispatch lock to serialize user actions and posted results.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if self.context.is_closed() {
            return Err(OrchestratorError::SessionClosed);
        }
        let state = self.run(event).await;
        if self.context.is_closed() {
            return Err(OrchestratorError::SessionClosed);
        }
        Ok(state)
    }

    async fn dispatch_posted(&self, posted: PostedEvent) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if self.context.is_closed() {
            debug!(event = ?posted.event, "session closed, dropping result");
            return;
        }
        if posted.pass != self.context.pass() {
            debug!(
                event = ?posted.event,
                pass = posted.pass,
                current = self.context.pass(),
                "dropping result of a previous pass"
            );
            return;
        }
        self.run(posted.event).await;
    }

    async fn run(&self, event: RegistrationEvent) -> RegistrationState {
        let span = info_span!(
            "usecase.registration.dispatch",
            session = self.session,
            event = ?event
        );
        async {
            let mut current = self.context.state();
            let mut pending_events = VecDeque::from([event]);

            while let Some(event) = pending_events.pop_front() {
                if self.context.is_closed() {
                    debug!(event = ?event, "session closed, dispatch stopped");
                    break;
                }
                let from = current.clone();
                let event_name = format!("{:?}", event);
                let starts_pass = matches!(
                    event,
                    RegistrationEvent::SaveRequested { .. } | RegistrationEvent::Resumed { .. }
                );

                let (next, actions) = self.machine.transition(current.clone(), event);
                if actions.is_empty() && next == from {
                    current = next;
                    continue;
                }
                if starts_pass {
                    let pass = self.context.start_pass();
                    debug!(pass, "registration pass started");
                }

                info!(from = ?from, to = ?next, event = %event_name, "registration state transition");
                let follow_up_events = self.execute_actions(actions).await;
                if self.context.is_closed() {
                    debug!(to = ?next, "session closed, transition dropped");
                    break;
                }
                self.context.set_state(next.clone());
                self.ui.state_changed(&next).await;

                pending_events.extend(follow_up_events);
                current = next;
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<RegistrationAction>) -> Vec<RegistrationEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            if self.context.is_closed() {
                break;
            }
            debug!(?action, "registration executing action");
            match action {
                RegistrationAction::Validate { reminder } => {
                    follow_up_events.push(match validate(&reminder) {
                        Ok(()) => RegistrationEvent::ValidationPassed,
                        Err(error) => RegistrationEvent::ValidationFailed { error },
                    });
                }
                RegistrationAction::ShowValidationError(error) => {
                    log_ui_error(
                        self.ui.show_validation_error(error).await,
                        "show_validation_error",
                    );
                }
                RegistrationAction::CheckPermission { tier } => {
                    follow_up_events.push(RegistrationEvent::PermissionChecked {
                        state: self.gate.check(tier),
                    });
                }
                RegistrationAction::RequestPermission { tier } => {
                    let gate = self.gate.clone();
                    self.spawn_task("request_permission", async move {
                        let state = match gate.request(tier).await {
                            Ok(state) => state,
                            Err(PermissionError::Abandoned) => {
                                debug!(?tier, "permission request abandoned");
                                return Some(RegistrationEvent::PlatformFlowAbandoned);
                            }
                            Err(err) => {
                                warn!(?tier, error = %err, "permission request failed");
                                PermissionState::Denied
                            }
                        };
                        Some(RegistrationEvent::PermissionResult { tier, state })
                    });
                }
                RegistrationAction::ShowRemediation(reason) => {
                    log_ui_error(self.ui.show_remediation(reason).await, "show_remediation");
                }
                RegistrationAction::DismissRemediation => {
                    log_ui_error(self.ui.dismiss_remediation().await, "dismiss_remediation");
                }
                RegistrationAction::OpenAppSettings => {
                    let gate = self.gate.clone();
                    self.spawn_task("open_app_settings", async move {
                        if let Err(err) = gate.open_app_settings().await {
                            warn!(error = %err, "opening application settings failed");
                        }
                        None
                    });
                }
                RegistrationAction::AllowReRegistration => {
                    self.context.re_registration().allow();
                    debug!("re-registration allowed for the next resume");
                }
                RegistrationAction::CheckSettings { delayed: false } => {
                    let outcome = tokio::select! {
                        _ = self.context.token().cancelled() => {
                            debug!("session closed during settings check");
                            break;
                        }
                        outcome = self.resolver.check(false) => outcome,
                    };
                    follow_up_events.push(RegistrationEvent::SettingsChecked { outcome });
                }
                RegistrationAction::CheckSettings { delayed: true } => {
                    let resolver = self.resolver.clone();
                    self.spawn_task("delayed_settings_check", async move {
                        Some(RegistrationEvent::SettingsChecked {
                            outcome: resolver.check(true).await,
                        })
                    });
                }
                RegistrationAction::LaunchResolution(handle) => {
                    let resolver = self.resolver.clone();
                    self.spawn_task("launch_resolution", async move {
                        let outcome = match resolver.resolve(handle).await {
                            Ok(outcome) => outcome,
                            Err(SettingsError::Abandoned) => {
                                debug!("resolution flow abandoned");
                                return Some(RegistrationEvent::PlatformFlowAbandoned);
                            }
                            Err(err) => {
                                warn!(error = %err, "resolution flow failed");
                                ResolutionOutcome::Declined
                            }
                        };
                        Some(RegistrationEvent::ResolutionFinished { outcome })
                    });
                }
                RegistrationAction::ConsumeReRegistrationFlag => {
                    let allowed = self.context.re_registration().take();
                    debug!(allowed, "re-registration flag consumed");
                    follow_up_events.push(RegistrationEvent::ReRegistrationFlagConsumed { allowed });
                }
                RegistrationAction::RegisterOne { reminder } => {
                    self.submit(self.registrar.register_one(reminder)).await;
                    follow_up_events.push(RegistrationEvent::RegistrationSubmitted);
                }
                RegistrationAction::RegisterAll => {
                    let ticket = self.register_all().await;
                    self.submit(ticket).await;
                    follow_up_events.push(RegistrationEvent::RegistrationSubmitted);
                }
                RegistrationAction::NavigateBack => {
                    log_ui_error(self.ui.navigate_back().await, "navigate_back");
                }
            }
        }
        follow_up_events
    }

    /// Re-registers the current reminder list. An empty list is not
    /// registered at all.
    async fn register_all(&self) -> RegistrationTicket {
        let all = match self.reminders.get_all().await {
            Ok(all) => all,
            Err(err) => {
                warn!(error = %err, "loading reminders for re-registration failed");
                return RegistrationTicket::ready(Err(err.into()));
            }
        };
        if all.is_empty() {
            debug!("no reminders to re-register");
            return RegistrationTicket::ready(Ok(RegistrationReport::empty()));
        }
        log_ui_error(
            self.ui.notify_re_registering(all.len()).await,
            "notify_re_registering",
        );
        self.registrar.register(all)
    }

    async fn submit(&self, ticket: RegistrationTicket) {
        let ticket = if self.await_registration {
            RegistrationTicket::ready(ticket.wait().await)
        } else {
            ticket
        };
        *self
            .last_registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(ticket);
    }

    /// Runs `task` in the background and posts its event, if any, to the
    /// event pump. The task is dropped when the session closes.
    fn spawn_task<F>(&self, task_name: &'static str, task: F)
    where
        F: Future<Output = Option<RegistrationEvent>> + Send + 'static,
    {
        let pass = self.context.pass();
        let token = self.context.token().clone();
        let events = self.events.clone();
        let span = info_span!("usecase.registration.task", task = task_name, pass);

        tokio::spawn(
            async move {
                let event = tokio::select! {
                    _ = token.cancelled() => {
                        debug!("session closed, task cancelled");
                        return;
                    }
                    event = task => event,
                };
                if let Some(event) = event {
                    if events.send(PostedEvent { pass, event }).is_err() {
                        debug!("event pump stopped, result dropped");
                    }
                }
            }
            .instrument(span),
        );
    }
}

impl Drop for RegistrationController {
    fn drop(&mut self) {
        self.context.close();
    }
}

async fn run_pump(
    controller: Weak<RegistrationController>,
    token: CancellationToken,
    mut rx: mpsc::UnboundedReceiver<PostedEvent>,
) {
    loop {
        let posted = tokio::select! {
            _ = token.cancelled() => break,
            posted = rx.recv() => match posted {
                Some(posted) => posted,
                None => break,
            },
        };
        let Some(controller) = controller.upgrade() else {
            break;
        };
        controller.dispatch_posted(posted).await;
    }
    debug!("registration event pump stopped");
}

fn log_ui_error(result: anyhow::Result<()>, action: &'static str) {
    if let Err(err) = result {
        warn!(action, error = ?err, "registration ui update failed");
    }
}

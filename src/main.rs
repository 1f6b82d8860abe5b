//! Demo driver: runs the registration scenarios against the simulated
//! platform, playing the user's part (answering prompts and dialogs).
//!
//! Usage: `locreminder [config.toml]`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use locreminder_lib::bootstrap::{
    self, default_config_path, load_config_or_default, PlatformServices,
};
use lr_core::config::AppConfig;
use lr_core::location::{PermissionState, PermissionTier, ResolutionOutcome};
use lr_core::ports::ReminderRepositoryPort;
use lr_core::registration::{RegistrationState, TerminalOutcome};
use lr_core::reminder::Reminder;
use lr_platform::{PlatformResult, ResultChannel};
use tokio::sync::watch;
use tracing::{info, info_span, Instrument};

const STEP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::tracing::init_tracing_subscriber(bootstrap::tracing::default_log_dir().as_deref())
        .context("Failed to initialize tracing")?;

    let config = match std::env::args().nth(1).map(PathBuf::from).or_else(default_config_path) {
        Some(path) => load_config_or_default(&path)?,
        None => AppConfig::default(),
    };
    let services = PlatformServices::wire(config);

    scenario_missing_location(&services)
        .instrument(info_span!("scenario", name = "missing_location"))
        .await?;
    scenario_permission_prompt(&services)
        .instrument(info_span!("scenario", name = "permission_prompt"))
        .await?;
    scenario_location_resolution(&services)
        .instrument(info_span!("scenario", name = "location_resolution"))
        .await?;
    scenario_re_registration(&services)
        .instrument(info_span!("scenario", name = "re_registration"))
        .await?;

    info!(
        regions = services.geofencing.region_count(),
        "all scenarios completed"
    );
    Ok(())
}

async fn wait_until(
    rx: &mut watch::Receiver<RegistrationState>,
    what: &str,
    predicate: impl FnMut(&RegistrationState) -> bool,
) -> anyhow::Result<RegistrationState> {
    let state = tokio::time::timeout(STEP_TIMEOUT, rx.wait_for(predicate))
        .await
        .map_err(|_| anyhow!("timed out waiting for {what}"))?
        .map_err(|_| anyhow!("session closed while waiting for {what}"))?
        .clone();
    Ok(state)
}

/// The user answers a platform prompt or dialog.
async fn answer(services: &PlatformServices, channel: ResultChannel, result: PlatformResult) {
    services.router.wait_for_pending(channel).await;
    let outcome = services.router.deliver(channel.code(), result);
    info!(code = channel.code(), ?outcome, "user answered");
}

fn reminder(title: &str, place: &str, lat: f64, lon: f64) -> Reminder {
    Reminder::draft().with_title(title).at(place, lat, lon)
}

/// Persists the reminder once its save pipeline finished.
async fn persist_if_saved(
    services: &PlatformServices,
    state: &RegistrationState,
    reminder: Reminder,
) -> anyhow::Result<()> {
    if *state == RegistrationState::Terminal(TerminalOutcome::Saved) {
        services.reminders.save(reminder).await?;
    }
    Ok(())
}

async fn scenario_missing_location(services: &PlatformServices) -> anyhow::Result<()> {
    services.permissions.grant(PermissionTier::Background);
    let session = services.save_reminder_session();

    let state = session
        .save(Reminder::draft().with_title("Buy stamps"))
        .await?;
    if !state.is_idle() {
        bail!("expected the screen to stay idle, got {state:?}");
    }
    info!(?state, "save without location rejected");
    Ok(())
}

async fn scenario_permission_prompt(services: &PlatformServices) -> anyhow::Result<()> {
    services.permissions.revoke(PermissionTier::Background);
    let session = services.save_reminder_session();
    let mut rx = session.subscribe();
    let draft = reminder("Return books", "Library", 52.3731, 4.8922);

    let mut state = session.save(draft.clone()).await?;
    if matches!(state, RegistrationState::AwaitingRemediation { .. }) {
        state = session.acknowledge_remediation().await?;
    }
    info!(?state, "permission prompt outstanding");

    answer(
        services,
        ResultChannel::BackgroundPermission,
        PlatformResult::Permission(PermissionState::Granted),
    )
    .await;

    let state = wait_until(&mut rx, "save to finish", RegistrationState::is_terminal).await?;
    persist_if_saved(services, &state, draft).await?;
    if let Some(ticket) = session.take_registration() {
        let report = ticket.wait().await?;
        info!(added = report.added.len(), "reminder saved after permission grant");
    }
    Ok(())
}

async fn scenario_location_resolution(services: &PlatformServices) -> anyhow::Result<()> {
    services.location_settings.set_enabled(false);
    let session = services.save_reminder_session();
    let mut rx = session.subscribe();
    let draft = reminder("Pick up parcel", "Post office", 52.3676, 4.9041);

    let state = session.save(draft.clone()).await?;
    info!(?state, "location resolution dialog outstanding");

    answer(
        services,
        ResultChannel::LocationResolution,
        PlatformResult::Resolution(ResolutionOutcome::Resolved),
    )
    .await;

    let state = wait_until(&mut rx, "save to finish", RegistrationState::is_terminal).await?;
    persist_if_saved(services, &state, draft).await?;
    info!(?state, "save finished after location resolution");
    Ok(())
}

async fn scenario_re_registration(services: &PlatformServices) -> anyhow::Result<()> {
    services
        .reminders
        .save(reminder("Water plants", "Office", 52.3584, 4.8811))
        .await?;
    services.permissions.revoke(PermissionTier::Background);

    let session = services.reminder_list_session();
    let mut rx = session.subscribe();

    let state = session.on_resume().await?;
    info!(?state, "list resumed without background permission");
    session.acknowledge_remediation().await?;

    // The user grants the permission on the settings page and comes back.
    services.permissions.grant(PermissionTier::Background);
    answer(
        services,
        ResultChannel::AppSettings,
        PlatformResult::AppSettingsClosed,
    )
    .await;

    session.on_resume().await?;
    wait_until(&mut rx, "re-registration", RegistrationState::is_idle).await?;

    let ticket = session
        .take_registration()
        .context("resume did not re-register geofences")?;
    let report = ticket.wait().await?;
    info!(
        removed_previous = report.removed_previous,
        added = report.added.len(),
        re_registration_allowed = session.re_registration_allowed(),
        "geofences re-registered"
    );
    Ok(())
}

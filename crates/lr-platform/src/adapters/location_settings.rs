use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lr_core::location::{
    LocationSettingsRequest, ResolutionHandle, ResolutionOutcome, SettingsCheckOutcome,
};
use lr_core::ports::{LocationSettingsPort, SettingsError};
use tracing::{debug, info};

use crate::result_router::{PlatformResult, ResultChannel, ResultRouter};

const RESOLUTION_HANDLE: &str = "enable-device-location";

/// Simulated device location settings.
///
/// While location is off a check fails resolvably unless the simulation is
/// told the failure cannot be fixed by the user. A resolution flow that ends
/// `Resolved` turns location on.
pub struct SimulatedLocationSettings {
    router: Arc<ResultRouter>,
    enabled: AtomicBool,
    resolvable: AtomicBool,
    checks: AtomicUsize,
    resolutions: AtomicUsize,
}

impl SimulatedLocationSettings {
    pub fn new(router: Arc<ResultRouter>) -> Self {
        Self {
            router,
            enabled: AtomicBool::new(true),
            resolvable: AtomicBool::new(true),
            checks: AtomicUsize::new(0),
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        debug!(enabled, "simulated device location toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_resolvable(&self, resolvable: bool) {
        self.resolvable.store(resolvable, Ordering::SeqCst);
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationSettingsPort for SimulatedLocationSettings {
    async fn check(
        &self,
        request: &LocationSettingsRequest,
    ) -> Result<SettingsCheckOutcome, SettingsError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        debug!(priority = ?request.priority, "location settings check");

        if self.is_enabled() {
            return Ok(SettingsCheckOutcome::Satisfied);
        }
        if self.resolvable.load(Ordering::SeqCst) {
            Ok(SettingsCheckOutcome::ResolvableFailure(ResolutionHandle(
                RESOLUTION_HANDLE.to_string(),
            )))
        } else {
            Ok(SettingsCheckOutcome::HardFailure {
                reason: "location settings change unavailable".to_string(),
            })
        }
    }

    async fn launch_resolution(
        &self,
        handle: ResolutionHandle,
    ) -> Result<ResolutionOutcome, SettingsError> {
        if handle.0 != RESOLUTION_HANDLE {
            return Err(SettingsError::ResolutionUnavailable(handle.0));
        }

        let rx = self.router.register(ResultChannel::LocationResolution);
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        info!(
            code = ResultChannel::LocationResolution.code(),
            "location resolution dialog shown"
        );

        match rx.await {
            Ok(PlatformResult::Resolution(outcome)) => {
                if outcome == ResolutionOutcome::Resolved {
                    self.set_enabled(true);
                }
                Ok(outcome)
            }
            Ok(other) => Err(SettingsError::Platform(format!(
                "unexpected result on resolution channel: {other:?}"
            ))),
            Err(_) => Err(SettingsError::Abandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_location_fails_resolvably_then_hard() {
        let settings = SimulatedLocationSettings::new(Arc::new(ResultRouter::new()));
        let request = LocationSettingsRequest::low_power();
        assert_eq!(
            settings.check(&request).await,
            Ok(SettingsCheckOutcome::Satisfied)
        );

        settings.set_enabled(false);
        assert!(matches!(
            settings.check(&request).await,
            Ok(SettingsCheckOutcome::ResolvableFailure(_))
        ));

        settings.set_resolvable(false);
        assert!(matches!(
            settings.check(&request).await,
            Ok(SettingsCheckOutcome::HardFailure { .. })
        ));
        assert_eq!(settings.checks(), 3);
    }

    #[tokio::test]
    async fn resolved_dialog_enables_location() {
        let router = Arc::new(ResultRouter::new());
        let settings = Arc::new(SimulatedLocationSettings::new(Arc::clone(&router)));
        settings.set_enabled(false);

        let flow = {
            let settings = Arc::clone(&settings);
            tokio::spawn(async move {
                settings
                    .launch_resolution(ResolutionHandle(RESOLUTION_HANDLE.into()))
                    .await
            })
        };
        router
            .wait_for_pending(ResultChannel::LocationResolution)
            .await;
        router.deliver(29, PlatformResult::Resolution(ResolutionOutcome::Resolved));

        assert_eq!(flow.await.unwrap(), Ok(ResolutionOutcome::Resolved));
        assert!(settings.is_enabled());
    }

    #[tokio::test]
    async fn unknown_handle_cannot_be_resolved() {
        let settings = SimulatedLocationSettings::new(Arc::new(ResultRouter::new()));
        let result = settings
            .launch_resolution(ResolutionHandle("other".into()))
            .await;
        assert!(matches!(result, Err(SettingsError::ResolutionUnavailable(_))));
        assert_eq!(settings.resolutions(), 0);
    }
}

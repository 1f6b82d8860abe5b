//! Location-settings resolver.
//!
//! Checks whether the device location service is adequate for geofence
//! monitoring and launches the platform resolution flow when asked to. The
//! decision of what to do with a failed check belongs to the registration
//! state machine.

use std::sync::Arc;
use std::time::Duration;

use lr_core::location::{
    LocationSettingsRequest, ResolutionHandle, ResolutionOutcome, SettingsCheckOutcome,
};
use lr_core::ports::{LocationSettingsPort, SettingsError};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct LocationSettingsResolver {
    port: Arc<dyn LocationSettingsPort>,
    grace_delay: Duration,
}

impl LocationSettingsResolver {
    pub fn new(port: Arc<dyn LocationSettingsPort>, grace_delay: Duration) -> Self {
        Self { port, grace_delay }
    }

    pub fn grace_delay(&self) -> Duration {
        self.grace_delay
    }

    /// Submits a low-power settings check, waiting out the grace delay first
    /// when `delayed` is set.
    ///
    /// Service errors are reported as [`SettingsCheckOutcome::HardFailure`].
    pub async fn check(&self, delayed: bool) -> SettingsCheckOutcome {
        if delayed {
            debug!(delay = ?self.grace_delay, "waiting before settings re-check");
            tokio::time::sleep(self.grace_delay).await;
        }

        let request = LocationSettingsRequest::low_power();
        match self.port.check(&request).await {
            Ok(outcome) => {
                debug!(outcome = ?outcome, "location settings checked");
                outcome
            }
            Err(err) => {
                warn!(error = %err, "location settings check failed");
                SettingsCheckOutcome::HardFailure {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Launches the resolution flow and waits for it to close.
    pub async fn resolve(
        &self,
        handle: ResolutionHandle,
    ) -> Result<ResolutionOutcome, SettingsError> {
        info!(handle = %handle.0, "launching location settings resolution");
        self.port.launch_resolution(handle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lr_core::location::LocationPriority;
    use mockall::mock;

    mock! {
        pub Settings {}

        #[async_trait]
        impl LocationSettingsPort for Settings {
            async fn check(
                &self,
                request: &LocationSettingsRequest,
            ) -> Result<SettingsCheckOutcome, SettingsError>;
            async fn launch_resolution(
                &self,
                handle: ResolutionHandle,
            ) -> Result<ResolutionOutcome, SettingsError>;
        }
    }

    #[tokio::test]
    async fn check_submits_low_power_request() {
        let mut port = MockSettings::new();
        port.expect_check()
            .withf(|request| request.priority == LocationPriority::LowPower)
            .times(1)
            .returning(|_| Ok(SettingsCheckOutcome::Satisfied));

        let resolver = LocationSettingsResolver::new(Arc::new(port), Duration::from_secs(1));
        assert_eq!(resolver.check(false).await, SettingsCheckOutcome::Satisfied);
    }

    #[tokio::test]
    async fn check_maps_service_error_to_hard_failure() {
        let mut port = MockSettings::new();
        port.expect_check()
            .returning(|_| Err(SettingsError::Platform("api unavailable".into())));

        let resolver = LocationSettingsResolver::new(Arc::new(port), Duration::from_secs(1));
        assert!(matches!(
            resolver.check(false).await,
            SettingsCheckOutcome::HardFailure { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_check_waits_for_grace_delay() {
        let mut port = MockSettings::new();
        port.expect_check()
            .returning(|_| Ok(SettingsCheckOutcome::Satisfied));

        let resolver = LocationSettingsResolver::new(Arc::new(port), Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        resolver.check(true).await;
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn first_check_does_not_wait() {
        let mut port = MockSettings::new();
        port.expect_check()
            .returning(|_| Ok(SettingsCheckOutcome::Satisfied));

        let resolver = LocationSettingsResolver::new(Arc::new(port), Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        resolver.check(false).await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}

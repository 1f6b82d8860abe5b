use async_trait::async_trait;

use crate::location::{
    LocationSettingsRequest, ResolutionHandle, ResolutionOutcome, SettingsCheckOutcome,
};
use crate::ports::errors::SettingsError;

/// Device location-settings service.
#[async_trait]
pub trait LocationSettingsPort: Send + Sync {
    async fn check(
        &self,
        request: &LocationSettingsRequest,
    ) -> Result<SettingsCheckOutcome, SettingsError>;

    /// Launches the user-facing resolution flow. The future completes when
    /// the flow closes.
    async fn launch_resolution(
        &self,
        handle: ResolutionHandle,
    ) -> Result<ResolutionOutcome, SettingsError>;
}

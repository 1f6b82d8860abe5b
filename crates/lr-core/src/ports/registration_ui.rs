use anyhow::Result;

use crate::registration::{RegistrationState, RemediationReason};
use crate::reminder::ValidationError;

/// Screen-side effects requested by the registration pipeline.
#[async_trait::async_trait]
pub trait RegistrationUiPort: Send + Sync {
    async fn show_validation_error(&self, error: ValidationError) -> Result<()>;
    async fn show_remediation(&self, reason: RemediationReason) -> Result<()>;
    async fn dismiss_remediation(&self) -> Result<()>;
    /// Tells the user that `count` geofences are being registered again.
    async fn notify_re_registering(&self, count: usize) -> Result<()>;
    async fn navigate_back(&self) -> Result<()>;
    async fn state_changed(&self, state: &RegistrationState);
}

use async_trait::async_trait;

use crate::location::{PermissionState, PermissionTier};
use crate::ports::errors::PermissionError;

/// Runtime location permission service.
#[async_trait]
pub trait PermissionPort: Send + Sync {
    /// Synchronous query, no side effect.
    fn is_granted(&self, tier: PermissionTier) -> bool;

    /// Shows the platform prompt for `tier`. The future completes when the
    /// user answers, which may be arbitrarily later.
    async fn request(&self, tier: PermissionTier) -> Result<PermissionState, PermissionError>;

    /// Opens the application's system settings page.
    async fn open_app_settings(&self) -> Result<(), PermissionError>;
}

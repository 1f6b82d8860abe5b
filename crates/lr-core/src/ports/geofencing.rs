use async_trait::async_trait;

use crate::geofence::{CallbackTarget, GeofenceSpec};
use crate::ports::errors::GeofencingError;

/// Platform geofencing service.
#[async_trait]
pub trait GeofencingPort: Send + Sync {
    /// Registers `spec`. A spec whose request id is already registered
    /// replaces the previous region.
    async fn add(&self, spec: &GeofenceSpec, target: &CallbackTarget)
        -> Result<(), GeofencingError>;

    /// Removes every geofence registered with `target`.
    async fn remove(&self, target: &CallbackTarget) -> Result<(), GeofencingError>;
}

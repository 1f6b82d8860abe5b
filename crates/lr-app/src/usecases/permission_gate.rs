//! Permission gate.
//!
//! Reads and requests the two location permission tiers. On platforms
//! without a distinct background tier every background query and request is
//! answered by the foreground tier.

use std::sync::Arc;

use lr_core::location::{PermissionState, PermissionTier};
use lr_core::ports::{PermissionError, PermissionPort};
use tracing::{debug, info};

#[derive(Clone)]
pub struct PermissionGate {
    port: Arc<dyn PermissionPort>,
    has_background_tier: bool,
}

impl PermissionGate {
    pub fn new(port: Arc<dyn PermissionPort>, has_background_tier: bool) -> Self {
        Self {
            port,
            has_background_tier,
        }
    }

    pub fn check_foreground(&self) -> PermissionState {
        PermissionState::from_granted(self.port.is_granted(PermissionTier::Foreground))
    }

    pub fn check_background(&self) -> PermissionState {
        if !self.has_background_tier {
            return self.check_foreground();
        }
        PermissionState::from_granted(self.port.is_granted(PermissionTier::Background))
    }

    pub fn check(&self, tier: PermissionTier) -> PermissionState {
        match tier {
            PermissionTier::Foreground => self.check_foreground(),
            PermissionTier::Background => self.check_background(),
        }
    }

    pub async fn request_foreground(&self) -> Result<PermissionState, PermissionError> {
        info!(tier = ?PermissionTier::Foreground, "requesting location permission");
        self.port.request(PermissionTier::Foreground).await
    }

    pub async fn request_background(&self) -> Result<PermissionState, PermissionError> {
        if !self.has_background_tier {
            debug!("no background permission tier, requesting foreground instead");
            return self.request_foreground().await;
        }
        info!(tier = ?PermissionTier::Background, "requesting location permission");
        self.port.request(PermissionTier::Background).await
    }

    pub async fn request(&self, tier: PermissionTier) -> Result<PermissionState, PermissionError> {
        match tier {
            PermissionTier::Foreground => self.request_foreground().await,
            PermissionTier::Background => self.request_background().await,
        }
    }

    pub async fn open_app_settings(&self) -> Result<(), PermissionError> {
        self.port.open_app_settings().await
    }
}

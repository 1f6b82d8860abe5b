//! Log-only registration UI.

use anyhow::Result;
use lr_core::ports::RegistrationUiPort;
use lr_core::registration::{RegistrationState, RemediationReason};
use lr_core::reminder::ValidationError;
use tracing::{debug, info};

/// Registration UI that writes every screen effect to the log.
#[derive(Debug, Clone)]
pub struct TracingUi {
    screen: &'static str,
}

impl TracingUi {
    pub fn new(screen: &'static str) -> Self {
        Self { screen }
    }
}

#[async_trait::async_trait]
impl RegistrationUiPort for TracingUi {
    async fn show_validation_error(&self, error: ValidationError) -> Result<()> {
        info!(screen = self.screen, %error, "validation error shown");
        Ok(())
    }

    async fn show_remediation(&self, reason: RemediationReason) -> Result<()> {
        info!(screen = self.screen, ?reason, "remediation prompt shown");
        Ok(())
    }

    async fn dismiss_remediation(&self) -> Result<()> {
        debug!(screen = self.screen, "remediation prompt dismissed");
        Ok(())
    }

    async fn notify_re_registering(&self, count: usize) -> Result<()> {
        info!(screen = self.screen, count, "re-registering geofences");
        Ok(())
    }

    async fn navigate_back(&self) -> Result<()> {
        info!(screen = self.screen, "navigating back");
        Ok(())
    }

    async fn state_changed(&self, state: &RegistrationState) {
        debug!(screen = self.screen, ?state, "registration state changed");
    }
}

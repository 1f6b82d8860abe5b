use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lr_core::location::{PermissionState, PermissionTier};
use lr_core::ports::{PermissionError, PermissionPort};
use tracing::{debug, info};

use crate::result_router::{PlatformResult, ResultChannel, ResultRouter};

/// Simulated runtime permission service.
///
/// `request` shows a prompt by registering on the tier's result channel and
/// completes when the driver delivers an answer. A granted answer updates
/// the stored grant; background implies foreground.
pub struct SimulatedPermissionService {
    router: Arc<ResultRouter>,
    foreground: AtomicBool,
    background: AtomicBool,
    requests: AtomicUsize,
    settings_opened: AtomicUsize,
}

impl SimulatedPermissionService {
    pub fn new(router: Arc<ResultRouter>) -> Self {
        Self {
            router,
            foreground: AtomicBool::new(false),
            background: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
            settings_opened: AtomicUsize::new(0),
        }
    }

    pub fn grant(&self, tier: PermissionTier) {
        match tier {
            PermissionTier::Foreground => self.foreground.store(true, Ordering::SeqCst),
            PermissionTier::Background => {
                self.foreground.store(true, Ordering::SeqCst);
                self.background.store(true, Ordering::SeqCst);
            }
        }
        debug!(?tier, "simulated permission granted");
    }

    pub fn revoke(&self, tier: PermissionTier) {
        match tier {
            PermissionTier::Foreground => {
                self.foreground.store(false, Ordering::SeqCst);
                self.background.store(false, Ordering::SeqCst);
            }
            PermissionTier::Background => self.background.store(false, Ordering::SeqCst),
        }
        debug!(?tier, "simulated permission revoked");
    }

    /// Number of permission prompts shown so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn settings_opened(&self) -> usize {
        self.settings_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionPort for SimulatedPermissionService {
    fn is_granted(&self, tier: PermissionTier) -> bool {
        match tier {
            PermissionTier::Foreground => self.foreground.load(Ordering::SeqCst),
            PermissionTier::Background => self.background.load(Ordering::SeqCst),
        }
    }

    async fn request(&self, tier: PermissionTier) -> Result<PermissionState, PermissionError> {
        let channel = ResultChannel::for_permission(tier);
        let rx = self.router.register(channel);
        self.requests.fetch_add(1, Ordering::SeqCst);
        info!(?tier, code = channel.code(), "permission prompt shown");

        match rx.await {
            Ok(PlatformResult::Permission(state)) => {
                if state.is_granted() {
                    self.grant(tier);
                }
                Ok(state)
            }
            Ok(other) => Err(PermissionError::Platform(format!(
                "unexpected result on permission channel: {other:?}"
            ))),
            Err(_) => Err(PermissionError::Abandoned),
        }
    }

    async fn open_app_settings(&self) -> Result<(), PermissionError> {
        let rx = self.router.register(ResultChannel::AppSettings);
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
        info!("application settings page opened");

        match rx.await {
            Ok(PlatformResult::AppSettingsClosed) => Ok(()),
            Ok(other) => Err(PermissionError::Platform(format!(
                "unexpected result on app settings channel: {other:?}"
            ))),
            Err(_) => Err(PermissionError::Abandoned),
        }
    }
}

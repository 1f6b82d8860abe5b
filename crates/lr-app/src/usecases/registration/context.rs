use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lr_core::registration::RegistrationState;
use tokio::sync::{watch, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Permission for the next resume pass to re-register every geofence.
///
/// Set only when the user acts on a remediation prompt; cleared by the first
/// read.
#[derive(Debug, Default)]
pub struct ReRegistrationFlag(AtomicBool);

impl ReRegistrationFlag {
    pub fn allow(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_allowed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Reads and clears the flag.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Shared registration context containing state, dispatch lock and session
/// lifetime.
///
/// ## Lock Ordering
/// `dispatch_lock` is the only async lock. State lives in a watch channel so
/// readers never wait on a dispatch in progress.
pub struct RegistrationContext {
    state: watch::Sender<RegistrationState>,
    /// Serializes dispatch calls. Held across transition, state update and
    /// action execution.
    dispatch_lock: Mutex<()>,
    /// Bumped whenever a new pass starts. Results posted by tasks of an older
    /// pass are dropped.
    pass: AtomicU64,
    token: CancellationToken,
    re_registration: ReRegistrationFlag,
}

impl RegistrationContext {
    pub fn new(initial_state: RegistrationState) -> Self {
        let (state, _) = watch::channel(initial_state);
        Self {
            state,
            dispatch_lock: Mutex::new(()),
            pass: AtomicU64::new(0),
            token: CancellationToken::new(),
            re_registration: ReRegistrationFlag::default(),
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.state.subscribe()
    }

    /// Should only be called while holding the dispatch lock.
    pub fn set_state(&self, state: RegistrationState) {
        self.state.send_replace(state);
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    pub fn pass(&self) -> u64 {
        self.pass.load(Ordering::SeqCst)
    }

    pub fn start_pass(&self) -> u64 {
        self.pass.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn re_registration(&self) -> &ReRegistrationFlag {
        &self.re_registration
    }
}

impl Default for RegistrationContext {
    fn default() -> Self {
        Self::new(RegistrationState::Idle)
    }
}

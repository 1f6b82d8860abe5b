//! Request-code based result routing.
//!
//! Each outstanding platform operation registers a one-shot receiver for its
//! [`ResultChannel`]. A delivery by numeric code completes that receiver; a
//! delivery for a channel with nobody waiting is dropped.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use lr_core::location::{PermissionState, PermissionTier, ResolutionOutcome};
use tokio::sync::{oneshot, Notify};
use tracing::{debug, warn};

/// Platform result channels, identified by request code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResultChannel {
    AppSettings = 28,
    LocationResolution = 29,
    ForegroundPermission = 34,
    BackgroundPermission = 35,
}

impl ResultChannel {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            28 => Some(Self::AppSettings),
            29 => Some(Self::LocationResolution),
            34 => Some(Self::ForegroundPermission),
            35 => Some(Self::BackgroundPermission),
            _ => None,
        }
    }

    pub fn for_permission(tier: PermissionTier) -> Self {
        match tier {
            PermissionTier::Foreground => Self::ForegroundPermission,
            PermissionTier::Background => Self::BackgroundPermission,
        }
    }
}

/// Payload delivered on a result channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformResult {
    Permission(PermissionState),
    Resolution(ResolutionOutcome),
    AppSettingsClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Nothing was waiting on the channel, or the waiter is gone.
    NoPendingReceiver,
    UnknownChannel,
}

#[derive(Default)]
pub struct ResultRouter {
    pending: Mutex<HashMap<ResultChannel, oneshot::Sender<PlatformResult>>>,
    registered: Notify,
}

impl ResultRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a waiter for `channel`. A waiter already registered on the
    /// same channel is replaced and observes a closed receiver.
    pub fn register(&self, channel: ResultChannel) -> oneshot::Receiver<PlatformResult> {
        let (tx, rx) = oneshot::channel();
        let replaced = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(channel, tx);
        if replaced.is_some() {
            debug!(code = channel.code(), "replacing pending result waiter");
        }
        self.registered.notify_waiters();
        rx
    }

    pub fn deliver(&self, code: u16, result: PlatformResult) -> DeliveryOutcome {
        let Some(channel) = ResultChannel::from_code(code) else {
            warn!(code, "result delivered for unknown request code");
            return DeliveryOutcome::UnknownChannel;
        };

        let sender = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&channel);
        match sender {
            Some(tx) => match tx.send(result) {
                Ok(()) => {
                    debug!(code, "platform result delivered");
                    DeliveryOutcome::Delivered
                }
                Err(_) => {
                    debug!(code, "result waiter gone, delivery dropped");
                    DeliveryOutcome::NoPendingReceiver
                }
            },
            None => {
                debug!(code, "no pending result waiter, delivery dropped");
                DeliveryOutcome::NoPendingReceiver
            }
        }
    }

    pub fn is_pending(&self, channel: ResultChannel) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&channel)
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Resolves once a live waiter is registered on `channel`.
    pub async fn wait_for_pending(&self, channel: ResultChannel) {
        loop {
            let registered = self.registered.notified();
            if self.is_pending(channel) {
                return;
            }
            registered.await;
        }
    }
}

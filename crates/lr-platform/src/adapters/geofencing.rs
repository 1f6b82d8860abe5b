use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use lr_core::geofence::{CallbackTarget, GeofenceSpec};
use lr_core::ids::ReminderId;
use lr_core::ports::{GeofencingError, GeofencingPort};
use tracing::{debug, warn};

/// Per-application geofence limit enforced by the platform.
pub const DEFAULT_MAX_GEOFENCES: usize = 100;

/// Call recorded by [`SimulatedGeofencingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeofencingCall {
    Add(ReminderId),
    Remove,
}

#[derive(Default)]
struct Registry {
    regions: BTreeMap<ReminderId, (GeofenceSpec, CallbackTarget)>,
    calls: Vec<GeofencingCall>,
    failure: Option<GeofencingError>,
}

/// Simulated geofencing service.
///
/// Regions are keyed by request id, so adding an id twice replaces the
/// region. Every call is recorded, including failed ones.
pub struct SimulatedGeofencingClient {
    registry: Mutex<Registry>,
    max_regions: usize,
}

impl Default for SimulatedGeofencingClient {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GEOFENCES)
    }
}

impl SimulatedGeofencingClient {
    pub fn new(max_regions: usize) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            max_regions,
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every following call fail with `failure` until cleared.
    pub fn fail_with(&self, failure: Option<GeofencingError>) {
        self.registry().failure = failure;
    }

    pub fn calls(&self) -> Vec<GeofencingCall> {
        self.registry().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.registry().calls.clear();
    }

    pub fn region(&self, id: &ReminderId) -> Option<GeofenceSpec> {
        self.registry().regions.get(id).map(|(spec, _)| spec.clone())
    }

    pub fn region_ids(&self) -> Vec<ReminderId> {
        self.registry().regions.keys().cloned().collect()
    }

    pub fn region_count(&self) -> usize {
        self.registry().regions.len()
    }
}

#[async_trait]
impl GeofencingPort for SimulatedGeofencingClient {
    async fn add(
        &self,
        spec: &GeofenceSpec,
        target: &CallbackTarget,
    ) -> Result<(), GeofencingError> {
        let mut registry = self.registry();
        registry.calls.push(GeofencingCall::Add(spec.request_id.clone()));

        if let Some(failure) = registry.failure.clone() {
            warn!(request_id = %spec.request_id, error = %failure, "simulated geofence add failed");
            return Err(failure);
        }
        if !registry.regions.contains_key(&spec.request_id)
            && registry.regions.len() >= self.max_regions
        {
            return Err(GeofencingError::TooManyGeofences);
        }

        registry
            .regions
            .insert(spec.request_id.clone(), (spec.clone(), target.clone()));
        debug!(
            request_id = %spec.request_id,
            radius_meters = spec.radius_meters,
            "geofence registered"
        );
        Ok(())
    }

    async fn remove(&self, target: &CallbackTarget) -> Result<(), GeofencingError> {
        let mut registry = self.registry();
        registry.calls.push(GeofencingCall::Remove);

        if let Some(failure) = registry.failure.clone() {
            warn!(error = %failure, "simulated geofence remove failed");
            return Err(failure);
        }

        let before = registry.regions.len();
        registry
            .regions
            .retain(|_, (_, registered)| registered != target);
        debug!(removed = before - registry.regions.len(), "geofences removed");
        Ok(())
    }
}

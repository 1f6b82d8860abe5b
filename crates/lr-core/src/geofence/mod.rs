//! Geofence definitions derived from reminders.

use serde::{Deserialize, Serialize};

use crate::ids::ReminderId;
use crate::reminder::Reminder;

/// Action identifier carried by the callback target. The downstream receiver
/// filters transition deliveries on it.
pub const GEOFENCE_EVENT_ACTION: &str = "SaveReminderFragment.action.ACTION_GEOFENCE_EVENT";

/// Default circular region radius.
pub const DEFAULT_GEOFENCE_RADIUS_METERS: f32 = 100.0;

/// Region transition that fires the geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeofenceTransition {
    Enter,
    Exit,
    Dwell,
}

/// Trigger evaluated at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialTrigger {
    /// Fire immediately if the device is already inside the region.
    Enter,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeofenceExpiration {
    Never,
    AfterMillis(u64),
}

/// Geofence derived from a reminder. Never stored.
///
/// `request_id` is the reminder id, so adding a spec for an id that is already
/// registered replaces the previous region instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSpec {
    pub request_id: ReminderId,
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_meters: f32,
    pub expiration: GeofenceExpiration,
    pub transition: GeofenceTransition,
    pub initial_trigger: InitialTrigger,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeofenceSpecError {
    #[error("reminder {0} has no coordinates")]
    MissingCoordinates(ReminderId),
    #[error("invalid radius: {0}")]
    InvalidRadius(String),
}

impl GeofenceSpec {
    /// Builds the geofence for `reminder` with the default radius.
    pub fn from_reminder(reminder: &Reminder) -> Result<Self, GeofenceSpecError> {
        Self::from_reminder_with_radius(reminder, DEFAULT_GEOFENCE_RADIUS_METERS)
    }

    pub fn from_reminder_with_radius(
        reminder: &Reminder,
        radius_meters: f32,
    ) -> Result<Self, GeofenceSpecError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(GeofenceSpecError::InvalidRadius(radius_meters.to_string()));
        }
        let (center_lat, center_lon) = reminder
            .coordinates()
            .ok_or_else(|| GeofenceSpecError::MissingCoordinates(reminder.id.clone()))?;

        Ok(Self {
            request_id: reminder.id.clone(),
            center_lat,
            center_lon,
            radius_meters,
            expiration: GeofenceExpiration::Never,
            transition: GeofenceTransition::Enter,
            initial_trigger: InitialTrigger::Enter,
        })
    }
}

/// Opaque deferred-invocation handle registered with the geofencing service.
///
/// The orchestrator uses a single fixed target; removing geofences by target
/// removes every region it registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallbackTarget {
    action: String,
}

impl CallbackTarget {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }

    /// The target used for every reminder geofence.
    pub fn geofence_events() -> Self {
        Self::new(GEOFENCE_EVENT_ACTION)
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl Default for CallbackTarget {
    fn default() -> Self {
        Self::geofence_events()
    }
}

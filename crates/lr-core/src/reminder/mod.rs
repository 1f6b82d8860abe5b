//! Reminder domain model.
//!
//! A reminder is owned by the persistence collaborator. The registration
//! orchestrator only reads it, either to validate a draft before saving or to
//! derive geofences from it.

mod validation;

use serde::{Deserialize, Serialize};

use crate::ids::ReminderId;

pub use validation::{validate, ValidationError};

/// Location-tagged reminder.
///
/// Every field except `id` is optional because the same type backs the edit
/// form, where the user may not have entered a title or picked a location yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Human readable label of the selected point of interest.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Reminder {
    /// Creates a reminder with a freshly generated id and no content.
    pub fn draft() -> Self {
        Self {
            id: ReminderId::new(),
            title: None,
            description: None,
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the selected location label and its coordinates together.
    pub fn at(mut self, label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.location = Some(label.into());
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Returns `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// A location counts as selected when the label is non-empty and the
    /// coordinates are present.
    pub fn has_selected_location(&self) -> bool {
        let has_label = self.location.as_deref().is_some_and(|l| !l.trim().is_empty());
        has_label && self.coordinates().is_some()
    }
}

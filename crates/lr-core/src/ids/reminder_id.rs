use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Reminder identifier.
///
/// Assigned once when the reminder is created and never reused. It doubles as
/// the geofence request id, so the platform sees exactly one region per id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(String);

impl_id!(ReminderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_id_generated_ids_are_unique() {
        let a = ReminderId::new();
        let b = ReminderId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reminder_id_from_str() {
        let id: ReminderId = "reminder-1".into();
        assert_eq!(id.as_str(), "reminder-1");
        assert_eq!(id.to_string(), "reminder-1");
    }
}

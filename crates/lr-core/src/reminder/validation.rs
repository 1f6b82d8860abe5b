use serde::{Deserialize, Serialize};

use super::Reminder;

/// Field-specific validation failure of a reminder draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a title")]
    EnterTitle,
    #[error("please select a location")]
    SelectLocation,
}

/// Validates a reminder draft before it is saved.
///
/// The title is checked first, so a draft missing both fields reports
/// [`ValidationError::EnterTitle`].
pub fn validate(reminder: &Reminder) -> Result<(), ValidationError> {
    if !reminder.has_title() {
        return Err(ValidationError::EnterTitle);
    }
    if !reminder.has_selected_location() {
        return Err(ValidationError::SelectLocation);
    }
    Ok(())
}

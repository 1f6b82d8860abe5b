//! Registration use cases.
//!
//! This module exposes the registration controller and the two screen
//! sessions built on it.

mod context;
pub mod controller;
mod reminder_list;
mod save_reminder;

pub use context::{ReRegistrationFlag, RegistrationContext};
pub use controller::{OrchestratorError, RegistrationController};
pub use reminder_list::ReminderListSession;
pub use save_reminder::SaveReminderSession;

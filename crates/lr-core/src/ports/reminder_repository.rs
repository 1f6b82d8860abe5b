use async_trait::async_trait;

use crate::ids::ReminderId;
use crate::ports::errors::ReminderRepositoryError;
use crate::reminder::Reminder;

/// Persistence collaborator. The registration orchestrator only calls
/// [`ReminderRepositoryPort::get_all`].
#[async_trait]
pub trait ReminderRepositoryPort: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Reminder>, ReminderRepositoryError>;
    async fn get(&self, id: &ReminderId) -> Result<Reminder, ReminderRepositoryError>;
    /// Inserts or replaces the reminder with the same id.
    async fn save(&self, reminder: Reminder) -> Result<(), ReminderRepositoryError>;
    async fn delete_all(&self) -> Result<(), ReminderRepositoryError>;
}

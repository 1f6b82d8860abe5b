use async_trait::async_trait;
use lr_core::ids::ReminderId;
use lr_core::ports::{ReminderRepositoryError, ReminderRepositoryPort};
use lr_core::reminder::Reminder;
use tokio::sync::RwLock;
use tracing::debug;

/// Reminder store kept in process memory, in insertion order.
#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: RwLock<Vec<Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reminders(reminders: impl IntoIterator<Item = Reminder>) -> Self {
        let mut stored: Vec<Reminder> = Vec::new();
        for reminder in reminders {
            upsert(&mut stored, reminder);
        }
        Self {
            reminders: RwLock::new(stored),
        }
    }
}

fn upsert(stored: &mut Vec<Reminder>, reminder: Reminder) {
    match stored.iter_mut().find(|r| r.id == reminder.id) {
        Some(existing) => *existing = reminder,
        None => stored.push(reminder),
    }
}

#[async_trait]
impl ReminderRepositoryPort for InMemoryReminderRepository {
    async fn get_all(&self) -> Result<Vec<Reminder>, ReminderRepositoryError> {
        Ok(self.reminders.read().await.clone())
    }

    async fn get(&self, id: &ReminderId) -> Result<Reminder, ReminderRepositoryError> {
        self.reminders
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| ReminderRepositoryError::NotFound(id.clone()))
    }

    async fn save(&self, reminder: Reminder) -> Result<(), ReminderRepositoryError> {
        debug!(reminder_id = %reminder.id, "saving reminder");
        upsert(&mut *self.reminders.write().await, reminder);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), ReminderRepositoryError> {
        let mut reminders = self.reminders.write().await;
        debug!(count = reminders.len(), "deleting all reminders");
        reminders.clear();
        Ok(())
    }
}

//! Local reminder notifications.
//!
//! The OS notification scheduler is an external collaborator behind the
//! [`ReminderScheduler`] trait. [`ReminderService`] pairs it with the
//! key-value store so a previously scheduled reminder can be found and
//! canceled when its event is edited or deleted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::info;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::utils::datetime::notify_time;

/// What the notification shows when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub sound: String,
}

impl NotificationContent {
    pub fn with_default_sound<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            sound: "default".to_string(),
        }
    }
}

/// Async interface over the OS notification scheduler.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Schedule a local notification at `trigger`, returning its id.
    async fn schedule(
        &self,
        content: NotificationContent,
        trigger: DateTime<Utc>,
    ) -> AppResult<String>;

    async fn cancel(&self, notification_id: &str) -> AppResult<()>;
}

const REMINDER_KEY_PREFIX: &str = "reminder:";

fn reminder_key(event_id: &str) -> String {
    format!("{}{}", REMINDER_KEY_PREFIX, event_id)
}

/// Schedules and cancels per-event reminders, keyed by event id.
pub struct ReminderService {
    scheduler: Arc<dyn ReminderScheduler>,
    db: Arc<Database>,
    lead_minutes: i64,
}

impl ReminderService {
    pub fn new(scheduler: Arc<dyn ReminderScheduler>, db: Arc<Database>, lead_minutes: i64) -> Self {
        Self {
            scheduler,
            db,
            lead_minutes,
        }
    }

    /// Enable or disable the reminder for an event.
    ///
    /// Enabling replaces any reminder already scheduled for the event and
    /// records the new notification id; disabling cancels the scheduled
    /// notification before clearing the mapping.
    pub async fn set_reminder(
        &self,
        event_id: &str,
        title: &str,
        start_date: DateTime<Utc>,
        enabled: bool,
    ) -> AppResult<()> {
        if !enabled {
            return self.cancel_reminder(event_id).await;
        }

        let key = reminder_key(event_id);
        if let Some(previous) = self.db.get(&key).await? {
            self.scheduler.cancel(&previous).await?;
        }

        let trigger = notify_time(start_date, self.lead_minutes);
        let content = NotificationContent::with_default_sound(title);
        let notification_id = self.scheduler.schedule(content, trigger).await?;

        self.db.set(&key, &notification_id).await?;
        info!(
            "Scheduled reminder for event {} at {}",
            event_id, trigger
        );
        Ok(())
    }

    /// Whether a reminder is currently scheduled for the event.
    pub async fn reminder_status(&self, event_id: &str) -> AppResult<bool> {
        Ok(self.db.get(&reminder_key(event_id)).await?.is_some())
    }

    /// Cancel the event's reminder if one is scheduled. No-op otherwise.
    pub async fn cancel_reminder(&self, event_id: &str) -> AppResult<()> {
        let key = reminder_key(event_id);

        if let Some(notification_id) = self.db.get(&key).await? {
            self.scheduler.cancel(&notification_id).await?;
            self.db.remove(&key).await?;
            info!("Canceled reminder for event {}", event_id);
        }

        Ok(())
    }
}

lazy_static! {
    static ref REMINDER_SERVICE: RwLock<Option<Arc<ReminderService>>> = RwLock::new(None);
}

/// Register the process-wide reminder service. Called once at app startup,
/// before any notification is scheduled; there is no teardown in a mobile
/// host.
pub async fn init_reminder_service(service: Arc<ReminderService>) {
    let mut slot = REMINDER_SERVICE.write().await;
    *slot = Some(service);
}

/// The process-wide reminder service registered at startup.
pub async fn reminder_service() -> AppResult<Arc<ReminderService>> {
    REMINDER_SERVICE
        .read()
        .await
        .clone()
        .ok_or_else(|| AppError::operation_failed("reminder service not initialized"))
}

// Dayview Library
// Core of a day-view calendar app: aggregation of events across the device's
// calendars, calendar listing and validation, date utilities, and local
// reminder scheduling. The OS calendar provider, notification scheduler, and
// presentation layer are external collaborators.

pub mod agenda;
pub mod calendars;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod models;
pub mod notifications;
pub mod provider;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use agenda::{list_events, CalendarFilter};
pub use config::AppConfig;
pub use database::Database;
pub use error::{AppError, AppResult};
pub use models::{AgendaEvent, Calendar, EventDraft, NewCalendar, RawEvent};
pub use notifications::{NotificationContent, ReminderScheduler, ReminderService};
pub use provider::{CalendarStore, InMemoryStore};
pub use state::{DayAction, DayState, FetchSequence, LaunchRoute};

use std::sync::Arc;

/// Application state shared across the application
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CalendarStore>,
    pub reminders: Arc<ReminderService>,
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CalendarStore>,
        scheduler: Arc<dyn ReminderScheduler>,
        db: Arc<Database>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        config.validate()?;

        let reminders = Arc::new(ReminderService::new(
            scheduler,
            db.clone(),
            config.reminder_lead_minutes,
        ));

        Ok(Self {
            store,
            reminders,
            db,
        })
    }
}

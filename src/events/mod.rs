//! Event and calendar write path: create, update, and delete go through the
//! provider, then the day view is re-fetched by the caller. Deleting an event
//! also cancels any reminder scheduled for it.

use log::info;

use crate::calendars::is_calendar_name_valid;
use crate::error::{AppError, AppResult};
use crate::models::{EventDraft, NewCalendar};
use crate::notifications::ReminderService;
use crate::provider::CalendarStore;

/// Create a new event, or update `existing_id` when editing. Returns the
/// event id the provider settled on.
pub async fn create_or_update_event(
    store: &dyn CalendarStore,
    existing_id: Option<&str>,
    draft: &EventDraft,
) -> AppResult<String> {
    let event_id = match existing_id {
        None => store.create_event(draft).await?,
        Some(id) => store.update_event(id, draft).await?,
    };

    info!("Saved event {}", event_id);
    Ok(event_id)
}

/// Delete an event and cancel its reminder, if one was scheduled.
pub async fn delete_event(
    store: &dyn CalendarStore,
    reminders: &ReminderService,
    event_id: &str,
) -> AppResult<()> {
    store.delete_event(event_id).await?;
    reminders.cancel_reminder(event_id).await?;

    info!("Deleted event {}", event_id);
    Ok(())
}

/// Create a new calendar after validating its title.
pub async fn create_calendar(
    store: &dyn CalendarStore,
    calendar: &NewCalendar,
) -> AppResult<String> {
    if calendar.title.trim().is_empty() {
        return Err(AppError::invalid_input("Calendar title cannot be empty"));
    }
    if !is_calendar_name_valid(&calendar.title) {
        return Err(AppError::invalid_input(format!(
            "Calendar title '{}' contains unsupported characters",
            calendar.title
        )));
    }

    store.create_calendar(calendar).await
}

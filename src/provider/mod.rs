//! Calendar provider boundary.
//!
//! The device calendar store is an external collaborator; this module defines
//! the async interface the rest of the crate programs against, plus an
//! in-memory implementation used by tests and as a reference backend.
//!
//! Permission gating happens before any of these methods are called: the core
//! assumes calendar access has already been granted by a dedicated screen.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::error::AppResult;
use crate::models::{Calendar, EventDraft, NewCalendar, RawEvent};

pub mod memory;

pub use memory::InMemoryStore;

/// Async interface over the device calendar provider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// All calendars known to the provider, in provider-native order and
    /// without any filtering applied.
    async fn list_calendars(&self) -> AppResult<Vec<Calendar>>;

    /// Events from the given calendars whose occurrence overlaps
    /// `[range_start, range_end]`.
    async fn list_events(
        &self,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<Vec<RawEvent>>;

    /// Create an event in `draft.calendar_id`, returning the new event id.
    async fn create_event(&self, draft: &EventDraft) -> AppResult<String>;

    /// Update an existing event, returning its id.
    async fn update_event(&self, event_id: &str, draft: &EventDraft) -> AppResult<String>;

    async fn delete_event(&self, event_id: &str) -> AppResult<()>;

    /// Create a new calendar, returning its id.
    async fn create_calendar(&self, calendar: &NewCalendar) -> AppResult<String>;
}

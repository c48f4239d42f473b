//! In-memory calendar store.
//!
//! Backs integration tests and doubles as a reference implementation of the
//! [`CalendarStore`] contract, including the range-overlap query semantics.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Calendar, EventDraft, NewCalendar, RawEvent};

use super::CalendarStore;

#[derive(Default, Clone)]
pub struct InMemoryStore {
    calendars: Arc<RwLock<Vec<Calendar>>>,
    events: Arc<RwLock<HashMap<String, RawEvent>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendars(calendars: Vec<Calendar>) -> Self {
        Self {
            calendars: Arc::new(RwLock::new(calendars)),
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed an event directly, bypassing the create path. Test helper.
    pub async fn insert_event(&self, event: RawEvent) {
        self.events.write().await.insert(event.id.clone(), event);
    }
}

#[async_trait]
impl CalendarStore for InMemoryStore {
    async fn list_calendars(&self) -> AppResult<Vec<Calendar>> {
        Ok(self.calendars.read().await.clone())
    }

    async fn list_events(
        &self,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<Vec<RawEvent>> {
        let events = self.events.read().await;

        let mut matching: Vec<RawEvent> = events
            .values()
            .filter(|e| calendar_ids.contains(&e.calendar_id))
            .filter(|e| e.start_date <= range_end && e.end_date >= range_start)
            .cloned()
            .collect();

        // HashMap iteration order is arbitrary; keep the result deterministic.
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matching)
    }

    async fn create_event(&self, draft: &EventDraft) -> AppResult<String> {
        let calendars = self.calendars.read().await;
        if !calendars.iter().any(|c| c.id == draft.calendar_id) {
            return Err(AppError::not_found(format!(
                "calendar {}",
                draft.calendar_id
            )));
        }
        drop(calendars);

        let id = Uuid::new_v4().to_string();
        let event = RawEvent {
            id: id.clone(),
            calendar_id: draft.calendar_id.clone(),
            title: draft.title.clone(),
            notes: draft.notes.clone(),
            location: draft.location.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
        };

        self.events.write().await.insert(id.clone(), event);
        Ok(id)
    }

    async fn update_event(&self, event_id: &str, draft: &EventDraft) -> AppResult<String> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(event_id)
            .ok_or_else(|| AppError::not_found(format!("event {}", event_id)))?;

        event.calendar_id = draft.calendar_id.clone();
        event.title = draft.title.clone();
        event.notes = draft.notes.clone();
        event.location = draft.location.clone();
        event.start_date = draft.start_date;
        event.end_date = draft.end_date;

        Ok(event_id.to_string())
    }

    async fn delete_event(&self, event_id: &str) -> AppResult<()> {
        self.events
            .write()
            .await
            .remove(event_id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("event {}", event_id)))
    }

    async fn create_calendar(&self, calendar: &NewCalendar) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();

        self.calendars.write().await.push(Calendar {
            id: id.clone(),
            title: calendar.title.clone(),
            color: calendar.color.clone(),
            allows_modifications: true,
        });

        Ok(id)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::Calendar;
use crate::utils::datetime::{is_all_day, minutes_between, time_of_day};

/// A calendar entry as returned by the device provider, undecorated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Fields accepted when creating or updating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub calendar_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A display-ready view over a [`RawEvent`], built fresh on every aggregation
/// call and never written back to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaEvent {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    /// Local-time `HH:MM`, zero-padded.
    pub start_time: String,
    pub end_time: String,
    /// Whole minutes between start and end; negative when the provider hands
    /// back an event with `start_date > end_date` (passed through, not clamped).
    pub duration: i64,
    /// True iff the event lasts exactly 24 hours.
    pub is_all_day: bool,

    // Copied from the owning calendar.
    pub color: String,
    pub calendar_title: String,
    pub allows_modifications: bool,
}

impl AgendaEvent {
    /// Decorate a raw event with its display fields and the owning calendar's
    /// metadata. The caller is responsible for passing the calendar the event
    /// actually belongs to.
    pub fn decorate(event: RawEvent, calendar: &Calendar) -> Self {
        let duration = minutes_between(event.start_date, event.end_date);

        Self {
            id: event.id,
            calendar_id: event.calendar_id,
            title: event.title,
            notes: event.notes,
            location: event.location,
            start_time: time_of_day(event.start_date),
            end_time: time_of_day(event.end_date),
            duration,
            is_all_day: is_all_day(event.start_date, event.end_date),
            start_date: event.start_date,
            end_date: event.end_date,
            color: calendar.color.clone(),
            calendar_title: calendar.title.clone(),
            allows_modifications: calendar.allows_modifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_calendar() -> Calendar {
        Calendar {
            id: "a".to_string(),
            title: "Work".to_string(),
            color: "#6366f1".to_string(),
            allows_modifications: true,
        }
    }

    fn raw_event(start: DateTime<Utc>, end: DateTime<Utc>) -> RawEvent {
        RawEvent {
            id: "1".to_string(),
            calendar_id: "a".to_string(),
            title: "Standup".to_string(),
            notes: None,
            location: Some("Room 2".to_string()),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_decorate_copies_calendar_metadata() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let decorated = AgendaEvent::decorate(
            raw_event(start, start + Duration::minutes(30)),
            &test_calendar(),
        );

        assert_eq!(decorated.calendar_title, "Work");
        assert_eq!(decorated.color, "#6366f1");
        assert!(decorated.allows_modifications);
        assert_eq!(decorated.duration, 30);
        assert!(!decorated.is_all_day);
    }

    #[test]
    fn test_decorate_exact_24h_is_all_day() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let decorated = AgendaEvent::decorate(
            raw_event(start, start + Duration::minutes(1440)),
            &test_calendar(),
        );

        assert_eq!(decorated.duration, 1440);
        assert!(decorated.is_all_day);
    }

    #[test]
    fn test_decorate_23h59m_is_not_all_day() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let decorated = AgendaEvent::decorate(
            raw_event(start, start + Duration::minutes(1439)),
            &test_calendar(),
        );

        assert!(!decorated.is_all_day);
    }

    #[test]
    fn test_decorate_malformed_event_keeps_negative_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap();
        let decorated = AgendaEvent::decorate(
            raw_event(start, start - Duration::minutes(15)),
            &test_calendar(),
        );

        // Provider data is the source of truth, so no clamping.
        assert_eq!(decorated.duration, -15);
        assert!(!decorated.is_all_day);
    }
}

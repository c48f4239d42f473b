//! Event aggregation: merge each calendar's events for a day into one
//! chronologically ordered, optionally filtered, display-ready list.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use log::debug;

use crate::error::AppResult;
use crate::models::{AgendaEvent, Calendar, RawEvent};
use crate::provider::CalendarStore;
use crate::utils::datetime::day_bounds;

/// Which calendar's events to show: everything, or one calendar only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarFilter {
    #[default]
    All,
    Only(String),
}

impl CalendarFilter {
    pub fn matches(&self, calendar_id: &str) -> bool {
        match self {
            CalendarFilter::All => true,
            CalendarFilter::Only(id) => id == calendar_id,
        }
    }
}

/// The decorated, sorted event list for one day.
///
/// Fetches every calendar's events for the day concurrently and waits for all
/// of them; a single failed fetch aborts the whole call (no partial results).
/// The day's boundaries are computed in UTC (see [`day_bounds`]).
///
/// # Caller contract
///
/// `calendars` must be the full set the events are fetched against. An event
/// whose `calendar_id` is missing from `calendars` is a precondition violation
/// and panics.
pub async fn list_events(
    store: &dyn CalendarStore,
    calendars: &[Calendar],
    day: DateTime<Utc>,
    filter: &CalendarFilter,
) -> AppResult<Vec<AgendaEvent>> {
    if calendars.is_empty() {
        return Ok(Vec::new());
    }

    let (start, end) = day_bounds(day);

    // Fan-out: one independent fetch per calendar; fan-in: no event is
    // processed until every fetch has returned.
    let fetches = calendars
        .iter()
        .map(|cal| store.list_events(std::slice::from_ref(&cal.id), start, end));
    let per_calendar = try_join_all(fetches).await?;

    let mut events: Vec<RawEvent> = per_calendar.into_iter().flatten().collect();

    // Stable sort: ties keep the concatenation order.
    events.sort_by_key(|e| e.start_date);

    let index = calendar_index(calendars);
    let agenda: Vec<AgendaEvent> = events
        .into_iter()
        .filter(|e| filter.matches(&e.calendar_id))
        .map(|event| {
            let calendar = index.get(event.calendar_id.as_str()).unwrap_or_else(|| {
                panic!(
                    "event {} references calendar {} absent from the input set",
                    event.id, event.calendar_id
                )
            });
            AgendaEvent::decorate(event, calendar)
        })
        .collect();

    debug!(
        "Aggregated {} events across {} calendars for {}",
        agenda.len(),
        calendars.len(),
        day.date_naive()
    );
    Ok(agenda)
}

/// One id → calendar map per aggregation call, so decoration does not rescan
/// the calendar list per event.
fn calendar_index(calendars: &[Calendar]) -> HashMap<&str, &Calendar> {
    calendars.iter().map(|c| (c.id.as_str(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::provider::MockCalendarStore;
    use chrono::{Duration, TimeZone};

    fn calendar(id: &str, title: &str) -> Calendar {
        Calendar {
            id: id.to_string(),
            title: title.to_string(),
            color: "#0ea5e9".to_string(),
            allows_modifications: true,
        }
    }

    fn raw_event(id: &str, calendar_id: &str, start: DateTime<Utc>, minutes: i64) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            calendar_id: calendar_id.to_string(),
            title: format!("event {}", id),
            notes: None,
            location: None,
            start_date: start,
            end_date: start + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_empty_calendars_makes_no_provider_calls() {
        let mut store = MockCalendarStore::new();
        store.expect_list_events().times(0);

        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let events = list_events(&store, &[], day, &CalendarFilter::All)
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_result_is_sorted_by_start_date() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let eight = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["a".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("1", "a", nine, 30)]));
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["b".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("2", "b", eight, 15)]));

        let calendars = [calendar("a", "Work"), calendar("b", "Personal")];
        let events = list_events(&store, &calendars, day, &CalendarFilter::All)
            .await
            .unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(events.windows(2).all(|w| w[0].start_date <= w[1].start_date));
    }

    #[tokio::test]
    async fn test_equal_start_dates_keep_concatenation_order() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["a".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("first", "a", nine, 30)]));
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["b".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("second", "b", nine, 30)]));

        let calendars = [calendar("a", "Work"), calendar("b", "Personal")];
        let events = list_events(&store, &calendars, day, &CalendarFilter::All)
            .await
            .unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_filter_drops_other_calendars() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let eight = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["a".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("1", "a", nine, 30)]));
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["b".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("2", "b", eight, 15)]));

        let calendars = [calendar("a", "Work"), calendar("b", "Personal")];
        let filter = CalendarFilter::Only("a".to_string());
        let events = list_events(&store, &calendars, day, &filter).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].calendar_title, "Work");
    }

    #[tokio::test]
    async fn test_single_failing_fetch_aborts_aggregation() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["a".to_string()])
            .returning(move |_, _, _| Ok(vec![raw_event("1", "a", nine, 30)]));
        store
            .expect_list_events()
            .withf(|ids, _, _| ids == ["b".to_string()])
            .returning(|_, _, _| Err(AppError::provider("access revoked")));

        let calendars = [calendar("a", "Work"), calendar("b", "Personal")];
        let result = list_events(&store, &calendars, day, &CalendarFilter::All).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    #[should_panic(expected = "absent from the input set")]
    async fn test_unknown_calendar_id_is_a_precondition_violation() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .returning(move |_, _, _| Ok(vec![raw_event("1", "ghost", nine, 30)]));

        let calendars = [calendar("a", "Work")];
        let _ = list_events(&store, &calendars, day, &CalendarFilter::All).await;
    }

    #[tokio::test]
    async fn test_fetch_range_is_the_utc_day() {
        let day = Utc.with_ymd_and_hms(2024, 3, 10, 17, 45, 0).unwrap();
        let expected_start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let expected_end = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);

        let mut store = MockCalendarStore::new();
        store
            .expect_list_events()
            .withf(move |_, start, end| *start == expected_start && *end == expected_end)
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let calendars = [calendar("a", "Work")];
        list_events(&store, &calendars, day, &CalendarFilter::All)
            .await
            .unwrap();
    }
}

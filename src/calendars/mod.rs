//! Calendar listing: the ordered, filtered set of calendars the user may
//! choose among, and the default-calendar selection for new events.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{AppError, AppResult};
use crate::models::Calendar;
use crate::provider::CalendarStore;

/// Preset palette offered when creating a calendar.
pub const CALENDAR_COLORS: [&str; 6] = [
    "#8b5cf6", "#6366f1", "#d946ef", "#0ea5e9", "#10b981", "#eab308",
];

/// Platform-injected read-only calendar with no useful semantics here.
const BIRTHDAYS_CALENDAR: &str = "Birthdays";

lazy_static! {
    // Latin letters (including Latin-1 Supplement accents), hyphen, period,
    // space. Hides provider-synced calendars with digits, emoji, or other
    // symbols in their names.
    static ref CALENDAR_NAME: Regex = Regex::new(r"^[a-zA-ZÀ-ÿ\-. ]*$").unwrap();
}

pub fn is_calendar_name_valid(name: &str) -> bool {
    CALENDAR_NAME.is_match(name)
}

/// The ordered, filtered list of calendars shown in the picker.
///
/// Drops the `"Birthdays"` calendar and any calendar with an invalid name,
/// then sorts by title ascending (case-insensitive).
pub async fn list_calendars(store: &dyn CalendarStore) -> AppResult<Vec<Calendar>> {
    let all = store.list_calendars().await?;
    let total = all.len();

    let mut calendars: Vec<Calendar> = all
        .into_iter()
        .filter(|c| c.title != BIRTHDAYS_CALENDAR)
        .filter(|c| is_calendar_name_valid(&c.title))
        .collect();

    calendars.sort_by_key(|c| c.title.to_lowercase());

    debug!("Listed {} of {} calendars", calendars.len(), total);
    Ok(calendars)
}

/// The id of the first calendar in the filtered, sorted list.
///
/// A device whose only calendars are `"Birthdays"` or invalidly named yields
/// no usable default; callers must prompt calendar creation in that case.
pub async fn default_calendar_id(store: &dyn CalendarStore) -> AppResult<String> {
    let calendars = list_calendars(store).await?;

    calendars
        .into_iter()
        .next()
        .map(|c| c.id)
        .ok_or(AppError::NoCalendarsAvailable)
}

/// The subsequence of `calendars` the user can actually write to. Read-only
/// calendars stay visible in the filter bar but are not event-creation targets.
pub fn filter_writable(calendars: &[Calendar]) -> Vec<Calendar> {
    calendars
        .iter()
        .filter(|c| c.allows_modifications)
        .cloned()
        .collect()
}

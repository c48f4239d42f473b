//! Pure date/time helpers shared by the aggregation service and the
//! presentation layer. All functions are stateless and deterministic given
//! their inputs (the ones involving "now" or local time read the process
//! timezone, which tests pin via the `TZ` environment variable).

use chrono::{DateTime, Datelike, Days, Duration, Local, Locale, Timelike, Utc};

/// Midnight UTC to 23:59:59.999 UTC of the same calendar day as `date`'s UTC
/// date component.
///
/// Day boundaries are computed in UTC regardless of the device timezone. For
/// users west of UTC this shifts which day late-evening events land on; the
/// behavior is kept as-is until product intent says otherwise.
pub fn day_bounds(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date
        .date_naive()
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);

    (start, end)
}

/// Local-time `HH:MM`, 24-hour, zero-padded (`09:05`, never `9:5`).
pub fn time_of_day(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%H:%M").to_string()
}

/// Whole minutes from `a` to `b`, rounded half away from zero (`f64::round`).
/// Negative when `b` is before `a`.
pub fn minutes_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    ((b - a).num_milliseconds() as f64 / 60_000.0).round() as i64
}

/// True iff the span from `a` to `b` is exactly 24 hours. Duration-based on
/// purpose: a 23h59m event is not all-day, and no provider flag is consulted.
pub fn is_all_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    minutes_between(a, b) == 1440
}

/// A date exactly `days` calendar days away, preserving time-of-day across
/// month, year, and DST boundaries per local calendar rules.
pub fn shift_day(date: DateTime<Local>, days: i64) -> DateTime<Local> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };

    // Falls back to a fixed 24h step when the target local time does not exist
    // (DST gap) or the date is out of range.
    shifted.unwrap_or_else(|| date + Duration::days(days))
}

/// True iff `date` has the same year, month, and day-of-month as now, in
/// local time.
pub fn is_same_calendar_day(date: DateTime<Local>) -> bool {
    let now = Local::now();
    date.year() == now.year() && date.month() == now.month() && date.day() == now.day()
}

/// The instant `lead_minutes` before `event_start`, with seconds and
/// sub-seconds zeroed, for use as a reminder trigger.
pub fn notify_time(event_start: DateTime<Utc>, lead_minutes: i64) -> DateTime<Utc> {
    let trigger = event_start - Duration::minutes(lead_minutes);

    trigger
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(trigger)
}

/// Full weekday name in the given locale, capitalized.
pub fn localized_weekday(date: DateTime<Local>, locale: Locale) -> String {
    capitalize(&date.format_localized("%A", locale).to_string())
}

/// Full month name in the given locale.
pub fn localized_month(date: DateTime<Local>, locale: Locale) -> String {
    date.format_localized("%B", locale).to_string()
}

/// Map a device language tag (`fr`, `en-US`, `tr`, ...) to a supported
/// formatting locale, falling back to `en-US`.
pub fn resolve_locale(tag: &str) -> Locale {
    let language = tag
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match language.as_str() {
        "fr" => Locale::fr_FR,
        "tr" => Locale::tr_TR,
        _ => Locale::en_US,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

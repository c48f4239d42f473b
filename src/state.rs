//! Day selection state and launch routing.
//!
//! The presentation layer owns this state and re-invokes the core with it as
//! plain arguments; the core itself holds no shared mutable state. Transitions
//! are an explicit, enumerated set rather than an ad hoc reducer.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

use crate::agenda::CalendarFilter;
use crate::database::Database;
use crate::error::AppResult;
use crate::utils::datetime::shift_day;

/// Where the app starts: onboarding on first launch, the day view afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchRoute {
    GetStarted,
    Home,
}

/// Resolve the launch route and record that the app has now launched.
pub async fn launch_route(db: &Database) -> AppResult<LaunchRoute> {
    if db.has_launched().await? {
        Ok(LaunchRoute::Home)
    } else {
        db.mark_launched().await?;
        Ok(LaunchRoute::GetStarted)
    }
}

/// The day and calendar filter currently shown.
#[derive(Debug, Clone)]
pub struct DayState {
    pub current_date: DateTime<Local>,
    pub filter: CalendarFilter,
}

/// The transitions the day view can take.
#[derive(Debug, Clone)]
pub enum DayAction {
    SetDate(DateTime<Local>),
    NextDay,
    PreviousDay,
    SetFilter(CalendarFilter),
    /// Re-fetch with unchanged state (e.g. on screen focus).
    Refresh,
}

impl DayState {
    pub fn new() -> Self {
        Self {
            current_date: Local::now(),
            filter: CalendarFilter::All,
        }
    }

    pub fn apply(&mut self, action: DayAction) {
        match action {
            DayAction::SetDate(date) => self.current_date = date,
            DayAction::NextDay => self.current_date = shift_day(self.current_date, 1),
            DayAction::PreviousDay => self.current_date = shift_day(self.current_date, -1),
            DayAction::SetFilter(filter) => self.filter = filter,
            DayAction::Refresh => {}
        }
    }
}

impl Default for DayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic sequence numbers for in-flight fetches.
///
/// `list_events` carries no cancellation token, so rapid day navigation can
/// leave an older fetch completing after a newer one. The presentation layer
/// tags each fetch with `begin()` and drops completions whose number is no
/// longer `is_current`.
#[derive(Debug, Default)]
pub struct FetchSequence(AtomicU64);

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating all earlier ones.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.0.load(Ordering::SeqCst) == seq
    }
}

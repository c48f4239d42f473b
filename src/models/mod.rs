pub mod calendar;
pub mod event;

pub use calendar::{Calendar, NewCalendar};
pub use event::{AgendaEvent, EventDraft, RawEvent};

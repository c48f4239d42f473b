use serde::{Deserialize, Serialize};

/// One source calendar from the device provider.
///
/// A read-only snapshot: the app never mutates a calendar after fetching it,
/// except through calendar creation which goes back through the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub title: String,
    pub color: String,
    pub allows_modifications: bool,
}

/// Fields for creating a new calendar through the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCalendar {
    pub title: String,
    pub color: String,
}

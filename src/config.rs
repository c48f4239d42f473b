//! Application configuration.
//!
//! Small and static: how far ahead of an event the reminder fires, and which
//! language drives localized date formatting.

use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::utils::datetime::resolve_locale;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minutes before an event's start that its reminder fires.
    pub reminder_lead_minutes: i64,
    /// Device language tag (`en`, `fr-FR`, `tr`, ...).
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reminder_lead_minutes: 1,
            language: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.reminder_lead_minutes < 0 {
            return Err(AppError::invalid_input(
                "reminder_lead_minutes cannot be negative",
            ));
        }
        if self.language.trim().is_empty() {
            return Err(AppError::invalid_input("language cannot be empty"));
        }
        Ok(())
    }

    /// The formatting locale for the configured language, with `en-US`
    /// fallback for unsupported languages.
    pub fn locale(&self) -> Locale {
        resolve_locale(&self.language)
    }
}

//! Deadline (personal task) model

use super::ModuleCode;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted and displayed for deadlines
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format accepted and displayed for deadlines
pub const TIME_FORMAT: &str = "%H:%M";

/// A task attached to a module, optionally due at a date and time
///
/// Date and time are held together so a deadline is either fully dated or undated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// Owning module
    pub module_code: ModuleCode,

    /// Free-text description, unique per module (case-insensitive)
    pub description: String,

    /// Due date and time, if any
    #[serde(default)]
    pub due: Option<NaiveDateTime>,
}

impl Deadline {
    /// Create a dated task
    #[must_use]
    pub fn new(
        module_code: ModuleCode,
        description: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            module_code,
            description: description.into(),
            due: Some(date.and_time(time)),
        }
    }

    /// Create a task with no due date
    #[must_use]
    pub fn undated(module_code: ModuleCode, description: impl Into<String>) -> Self {
        Self {
            module_code,
            description: description.into(),
            due: None,
        }
    }

    /// Due date, if dated
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.due.map(|due| due.date())
    }

    /// Due time, if dated
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        self.due.map(|due| due.time())
    }

    /// Identity check: same module and same description ignoring case
    #[must_use]
    pub fn matches(&self, module_code: &ModuleCode, description: &str) -> bool {
        &self.module_code == module_code && self.description.eq_ignore_ascii_case(description)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.module_code, self.description)?;
        if let Some(due) = self.due {
            write!(
                f,
                " (due {} {})",
                due.format(DATE_FORMAT),
                due.format(TIME_FORMAT)
            )?;
        }
        Ok(())
    }
}

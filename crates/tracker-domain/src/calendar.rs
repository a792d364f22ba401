//! Calendar events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::time::parse_timestamp;
use crate::validation::{require_ordered, require_text, Validate, ValidationIssue};

pub type CalendarEntry = Record<CalendarEvent>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start_time: start.into(),
            end_time: end.into(),
            location: None,
            all_day: false,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Whether the event covers any part of `day`
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match (parse_timestamp(&self.start_time), parse_timestamp(&self.end_time)) {
            (Some(start), Some(end)) => start.date() <= day && day <= end.date(),
            (Some(start), None) => start.date() == day,
            _ => false,
        }
    }

    /// Length in minutes; `None` for all-day or unparsable events
    pub fn duration_minutes(&self) -> Option<i64> {
        if self.all_day {
            return None;
        }
        let start = parse_timestamp(&self.start_time)?;
        let end = parse_timestamp(&self.end_time)?;
        Some((end - start).num_minutes())
    }
}

impl Validate for CalendarEvent {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title, "Title");
        require_ordered(&mut issues, &self.start_time, &self.end_time);
        issues
    }
}

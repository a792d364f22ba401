//! Sleep tracking

use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::time::parse_timestamp;
use crate::validation::{require_ordered, Validate, ValidationIssue};

/// A sleep entry as stored
pub type SleepEntry = Record<Sleep>;

/// Length of a night's sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct SleepDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl SleepDuration {
    /// Widened so stored values of any size cannot overflow
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}

/// Sleep-specific fields.
///
/// Either a start/end pair or an explicit duration may be recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct Sleep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<SleepDuration>,
    /// 1 (poor) to 5 (excellent)
    pub quality: u8,
}

impl Sleep {
    /// Sleep logged as a duration
    pub fn with_duration(hours: u32, minutes: u32, quality: u8) -> Self {
        Self {
            start_time: None,
            end_time: None,
            duration: Some(SleepDuration { hours, minutes }),
            quality,
        }
    }

    /// Sleep logged as a start/end interval
    pub fn between(start: impl Into<String>, end: impl Into<String>, quality: u8) -> Self {
        Self {
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            duration: None,
            quality,
        }
    }

    /// Hours slept. An explicit duration wins over the start/end interval.
    pub fn hours_slept(&self) -> Option<f64> {
        if let Some(d) = self.duration {
            return Some(d.total_minutes() as f64 / 60.0);
        }
        let start = parse_timestamp(self.start_time.as_deref()?)?;
        let end = parse_timestamp(self.end_time.as_deref()?)?;
        let minutes = (end - start).num_minutes();
        (minutes >= 0).then(|| minutes as f64 / 60.0)
    }
}

impl Validate for Sleep {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !(1..=5).contains(&self.quality) {
            issues.push(ValidationIssue::error("quality", "Quality must be between 1 and 5"));
        }

        match (&self.start_time, &self.end_time, &self.duration) {
            (Some(start), Some(end), _) => require_ordered(&mut issues, start, end),
            (None, None, None) => issues.push(ValidationIssue::error(
                "duration",
                "Either a duration or a start and end time is required",
            )),
            (Some(_), None, None) | (None, Some(_), None) => issues.push(ValidationIssue::error(
                "endTime",
                "Start and end time must be given together",
            )),
            _ => {}
        }

        if let Some(d) = self.duration {
            if d.minutes >= 60 {
                issues.push(ValidationIssue::error("duration", "Minutes must be below 60"));
            }
            if d.total_minutes() > 24 * 60 {
                issues.push(ValidationIssue::warning("duration", "Longer than a day"));
            }
        }

        issues
    }
}

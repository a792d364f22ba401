//! Validation for tracked records
//!
//! The stores accept any well-formed record; these checks are for callers
//! that want to reject bad input before it is saved.

use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::time::parse_timestamp;

/// Severity of a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    pub fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    pub fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

/// Something that can be checked for user-input mistakes.
pub trait Validate {
    fn validate(&self) -> Vec<ValidationIssue>;

    /// Whether no error-severity issue is reported
    fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|i| i.severity != ValidationSeverity::Error)
    }
}

impl<T: Validate> Validate for Record<T> {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if parse_timestamp(&self.date).is_none() {
            issues.push(ValidationIssue::error("date", "Date must be an ISO-8601 timestamp"));
        }
        issues.extend(self.fields.validate());
        issues
    }
}

/// Error unless `value` has non-whitespace content.
pub(crate) fn require_text(issues: &mut Vec<ValidationIssue>, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::error(field, format!("{} is required", label)));
    }
}

/// Error unless `end` is a timestamp not earlier than `start`.
pub(crate) fn require_ordered(issues: &mut Vec<ValidationIssue>, start: &str, end: &str) {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(s), Some(e)) if e < s => {
            issues.push(ValidationIssue::error("endTime", "End time must not precede start time"));
        }
        (None, _) => issues.push(ValidationIssue::error("startTime", "Start time is not a timestamp")),
        (_, None) => issues.push(ValidationIssue::error("endTime", "End time is not a timestamp")),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(Vec<ValidationIssue>);

    impl Validate for Always {
        fn validate(&self) -> Vec<ValidationIssue> {
            self.0.clone()
        }
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let v = Always(vec![ValidationIssue::warning("notes", "Long")]);
        assert!(v.is_valid());
        let v = Always(vec![ValidationIssue::error("title", "Missing")]);
        assert!(!v.is_valid());
    }

    #[test]
    fn record_checks_date() {
        let record = Record {
            id: "r".into(),
            date: "not a date".into(),
            tags: vec![],
            notes: None,
            fields: Always(vec![]),
        };
        let issues = record.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "date");
    }

    #[test]
    fn ordered_times() {
        let mut issues = Vec::new();
        require_ordered(&mut issues, "2024-01-01T10:00", "2024-01-01T09:00");
        assert_eq!(issues.len(), 1);

        issues.clear();
        require_ordered(&mut issues, "2024-01-01T10:00", "2024-01-01T10:00");
        assert!(issues.is_empty());
    }
}

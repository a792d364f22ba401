//! Screen time tracking

use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::validation::{Validate, ValidationIssue};

pub type ScreenTimeEntry = Record<ScreenTime>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct ScreenTime {
    /// Minutes of use
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ScreenTime {
    pub fn minutes(duration: u32) -> Self {
        Self {
            duration,
            device: None,
            category: None,
        }
    }

    pub fn on_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Sum of minutes across `entries`
pub fn total_minutes<'a>(entries: impl IntoIterator<Item = &'a ScreenTimeEntry>) -> u64 {
    entries
        .into_iter()
        .map(|e| u64::from(e.fields.duration))
        .sum()
}

impl Validate for ScreenTime {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.duration == 0 {
            issues.push(ValidationIssue::error("duration", "Duration must be positive"));
        }
        if self.duration > 24 * 60 {
            issues.push(ValidationIssue::warning("duration", "Longer than a day"));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::NewRecord;

    #[test]
    fn totals() {
        let entries: Vec<ScreenTimeEntry> = [30, 45, 5]
            .iter()
            .enumerate()
            .map(|(i, m)| {
                Record::from_new(i.to_string(), NewRecord::new("2024-01-01", ScreenTime::minutes(*m)))
            })
            .collect();
        assert_eq!(total_minutes(&entries), 80);
    }

    #[test]
    fn totals_do_not_overflow() {
        let entries: Vec<ScreenTimeEntry> = (0..3)
            .map(|i| {
                Record::from_new(
                    i.to_string(),
                    NewRecord::new("2024-01-01", ScreenTime::minutes(u32::MAX)),
                )
            })
            .collect();
        assert_eq!(total_minutes(&entries), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn zero_duration_invalid() {
        assert!(!ScreenTime::minutes(0).is_valid());
        assert!(ScreenTime::minutes(90).on_device("phone").in_category("social").is_valid());
    }
}

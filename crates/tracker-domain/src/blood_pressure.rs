//! Blood pressure readings

use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::time::{hour_of, parse_timestamp};
use crate::validation::{Validate, ValidationIssue};

pub type BloodPressureEntry = Record<BloodPressure>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct BloodPressure {
    /// mmHg
    pub systolic: u16,
    /// mmHg
    pub diastolic: u16,
    /// Beats per minute
    pub heart_rate: u16,
    /// When the reading was taken
    pub time_of_day: String,
}

impl BloodPressure {
    pub fn new(systolic: u16, diastolic: u16, heart_rate: u16, time_of_day: impl Into<String>) -> Self {
        Self {
            systolic,
            diastolic,
            heart_rate,
            time_of_day: time_of_day.into(),
        }
    }

    /// Part of the day the reading falls in
    pub fn period(&self) -> Option<DayPeriod> {
        hour_of(&self.time_of_day).map(DayPeriod::from_hour)
    }
}

/// Coarse part of the day used to group readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    /// 06:00-11:59
    Morning,
    /// 12:00-17:59
    Afternoon,
    /// 18:00-21:59
    Evening,
    /// 22:00-05:59
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            18..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }
}

/// Readings taken during `period`
pub fn readings_in<'a>(
    entries: &'a [BloodPressureEntry],
    period: DayPeriod,
) -> impl Iterator<Item = &'a BloodPressureEntry> + 'a {
    entries
        .iter()
        .filter(move |e| e.fields.period() == Some(period))
}

impl Validate for BloodPressure {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.systolic == 0 {
            issues.push(ValidationIssue::error("systolic", "Systolic pressure is required"));
        }
        if self.diastolic == 0 {
            issues.push(ValidationIssue::error("diastolic", "Diastolic pressure is required"));
        }
        if self.heart_rate == 0 {
            issues.push(ValidationIssue::error("heartRate", "Heart rate is required"));
        }
        if self.systolic != 0 && self.systolic <= self.diastolic {
            issues.push(ValidationIssue::error(
                "systolic",
                "Systolic pressure must be above diastolic",
            ));
        }
        if parse_timestamp(&self.time_of_day).is_none() {
            issues.push(ValidationIssue::error("timeOfDay", "Time of day is not a timestamp"));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracker_core::NewRecord;

    #[rstest]
    #[case(0, DayPeriod::Night)]
    #[case(5, DayPeriod::Night)]
    #[case(6, DayPeriod::Morning)]
    #[case(11, DayPeriod::Morning)]
    #[case(12, DayPeriod::Afternoon)]
    #[case(18, DayPeriod::Evening)]
    #[case(21, DayPeriod::Evening)]
    #[case(22, DayPeriod::Night)]
    fn periods(#[case] hour: u32, #[case] period: DayPeriod) {
        assert_eq!(DayPeriod::from_hour(hour), period);
    }

    #[test]
    fn filter_by_period() {
        let entries: Vec<BloodPressureEntry> = ["2024-01-01T07:30", "2024-01-01T19:10", "2024-01-02T08:00"]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Record::from_new(
                    i.to_string(),
                    NewRecord::new("2024-01-01T00:00:00.000Z", BloodPressure::new(120, 80, 70, *t)),
                )
            })
            .collect();
        assert_eq!(readings_in(&entries, DayPeriod::Morning).count(), 2);
        assert_eq!(readings_in(&entries, DayPeriod::Evening).count(), 1);
        assert_eq!(readings_in(&entries, DayPeriod::Night).count(), 0);
    }

    #[test]
    fn validation() {
        assert!(BloodPressure::new(118, 76, 64, "2024-01-01T08:00").is_valid());
        assert!(!BloodPressure::new(0, 76, 64, "2024-01-01T08:00").is_valid());
        assert!(!BloodPressure::new(118, 76, 64, "morning").is_valid());
        assert!(!BloodPressure::new(70, 80, 64, "2024-01-01T08:00").is_valid());
    }
}

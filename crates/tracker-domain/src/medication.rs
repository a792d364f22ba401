//! Medication tracking

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracker_core::Record;

use crate::validation::{require_text, Validate, ValidationIssue};

pub type MedicationEntry = Record<Medication>;

/// One dose, scheduled or taken as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct MedicationDose {
    /// Planned time; preserved when the dose is taken
    pub scheduled_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_time: Option<String>,
    #[serde(default)]
    pub taken: bool,
}

impl MedicationDose {
    pub fn scheduled(at: impl Into<String>) -> Self {
        Self {
            scheduled_time: at.into(),
            taken_time: None,
            taken: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(rename = "medication")]
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub is_as_needed: bool,
    #[serde(default)]
    pub scheduled_doses: Vec<MedicationDose>,
    #[serde(default)]
    pub as_needed_doses: Vec<MedicationDose>,
}

impl Medication {
    /// A medication taken at fixed times
    pub fn scheduled(name: impl Into<String>, dosage: impl Into<String>, times: &[&str]) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            is_as_needed: false,
            scheduled_doses: times.iter().map(|t| MedicationDose::scheduled(*t)).collect(),
            as_needed_doses: Vec::new(),
        }
    }

    /// A medication taken only when needed
    pub fn as_needed(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            is_as_needed: true,
            scheduled_doses: Vec::new(),
            as_needed_doses: Vec::new(),
        }
    }

    /// Mark scheduled dose `index` as taken or not.
    ///
    /// Taking a dose stamps `taken_at` (now when `None`); un-taking clears the
    /// stamp. Returns false when `index` is out of range.
    pub fn set_dose_taken(&mut self, index: usize, taken: bool, taken_at: Option<&str>) -> bool {
        let Some(dose) = self.scheduled_doses.get_mut(index) else {
            return false;
        };
        dose.taken = taken;
        dose.taken_time = taken.then(|| taken_at.map(str::to_string).unwrap_or_else(now));
        true
    }

    /// Record an as-needed dose taken at `at` (now when `None`).
    pub fn log_as_needed_dose(&mut self, at: Option<&str>) -> &MedicationDose {
        let at = at.map(str::to_string).unwrap_or_else(now);
        self.as_needed_doses.push(MedicationDose {
            scheduled_time: at.clone(),
            taken_time: Some(at),
            taken: true,
        });
        &self.as_needed_doses[self.as_needed_doses.len() - 1]
    }

    /// Scheduled doses not yet taken
    pub fn pending_doses(&self) -> impl Iterator<Item = &MedicationDose> {
        self.scheduled_doses.iter().filter(|d| !d.taken)
    }

    /// Fraction of scheduled doses taken, if any are scheduled
    pub fn adherence(&self) -> Option<f64> {
        if self.scheduled_doses.is_empty() {
            return None;
        }
        let taken = self.scheduled_doses.iter().filter(|d| d.taken).count();
        Some(taken as f64 / self.scheduled_doses.len() as f64)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Validate for Medication {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "medication", &self.name, "Medication name");
        require_text(&mut issues, "dosage", &self.dosage, "Dosage");

        if !self.is_as_needed {
            if self.scheduled_doses.iter().all(|d| d.scheduled_time.trim().is_empty()) {
                issues.push(ValidationIssue::error(
                    "scheduledDoses",
                    "At least one dose time is required for scheduled medication",
                ));
            }
        } else if !self.scheduled_doses.is_empty() {
            issues.push(ValidationIssue::warning(
                "scheduledDoses",
                "As-needed medication should not have scheduled doses",
            ));
        }
        issues
    }
}

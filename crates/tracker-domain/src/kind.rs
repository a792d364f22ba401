//! The fixed set of tracked entity types.

use serde::{Deserialize, Serialize};

/// A kind of tracked entity. Also the type of a dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Sleep,
    ScreenTime,
    Medication,
    Todo,
    Calendar,
    BloodPressure,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Sleep,
        EntityKind::ScreenTime,
        EntityKind::Medication,
        EntityKind::Todo,
        EntityKind::Calendar,
        EntityKind::BloodPressure,
    ];

    /// Storage-key suffix of this kind's record collection
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Sleep => "sleepEntries",
            EntityKind::ScreenTime => "screenTimeEntries",
            EntityKind::Medication => "medicationEntries",
            EntityKind::Todo => "todoItems",
            EntityKind::Calendar => "calendarEvents",
            EntityKind::BloodPressure => "bloodPressureEntries",
        }
    }

    /// Title used for a freshly created view of this kind
    pub fn default_title(&self) -> &'static str {
        match self {
            EntityKind::Sleep => "Sleep Tracker",
            EntityKind::ScreenTime => "Screen Time",
            EntityKind::Medication => "Medication",
            EntityKind::Todo => "To-Do List",
            EntityKind::Calendar => "Calendar",
            EntityKind::BloodPressure => "Blood Pressure",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Sleep => "sleep",
            EntityKind::ScreenTime => "screenTime",
            EntityKind::Medication => "medication",
            EntityKind::Todo => "todo",
            EntityKind::Calendar => "calendar",
            EntityKind::BloodPressure => "bloodPressure",
        };
        f.write_str(name)
    }
}

//! Entity types tracked by the habit tracker
//!
//! Each entity is a field set stored as `tracker_core::Record<T>`:
//! - Sleep: duration or start/end interval, quality 1-5
//! - ScreenTime: minutes per device and category
//! - Medication: scheduled and as-needed doses
//! - Todo: items grouped under a to-do list view
//! - CalendarEvent: timed or all-day events
//! - BloodPressure: readings with heart rate and time of day

pub mod blood_pressure;
pub mod calendar;
pub mod kind;
pub mod medication;
pub mod screen_time;
pub mod sleep;
pub mod time;
pub mod todo;
pub mod validation;

pub use blood_pressure::*;
pub use calendar::*;
pub use kind::*;
pub use medication::*;
pub use screen_time::*;
pub use sleep::*;
pub use time::*;
pub use todo::*;
pub use validation::*;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

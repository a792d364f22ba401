//! tracker-session: dashboard views and the per-identity session.
//!
//! `TrackerSession` ties the record stores of every entity type, the tag
//! registry, and the view registry to one identity. `ViewRegistry` holds the
//! only cross-store rule: deleting a view deletes the to-do items in it.

pub mod config;
pub mod error;
pub mod session;
pub mod views;

pub use config::*;
pub use error::*;
pub use session::*;
pub use views::*;

//! tracker-tags: user-defined labels shared across every tracked entity.
//!
//! Records hold tags by id only. The registry never cascades a deletion into
//! records, so a deleted tag leaves dangling references behind.

#[cfg(feature = "native")]
uniffi::setup_scaffolding!();

pub mod config;
pub mod registry;
pub mod tag;

pub use config::*;
pub use registry::*;
pub use tag::*;

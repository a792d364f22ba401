//! tracker-core: local-first, namespaced record storage.
//!
//! Collections are held in memory and written back in full to a synchronous
//! key-value substrate after every mutation. Each identity (signed-in user,
//! guest, or unresolved) gets its own key prefix.

pub mod collection;
pub mod error;
pub mod event;
pub mod id;
pub mod namespace;
pub mod record;
pub mod store;
pub mod substrate;

#[cfg(feature = "sqlite")]
pub mod sqlite_substrate;

pub use collection::*;
pub use error::*;
pub use event::*;
pub use id::*;
pub use namespace::*;
pub use record::*;
pub use store::*;
pub use substrate::*;

#[cfg(feature = "sqlite")]
pub use sqlite_substrate::SqliteKeyValueStore;

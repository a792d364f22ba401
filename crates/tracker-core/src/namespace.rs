//! Identity-scoped storage keys.
//!
//! Every collection is stored under `<prefix><collection>`, where the prefix
//! is derived from the identity that is currently active:
//!
//! | identity | prefix |
//! |---|---|
//! | signed-in user `u` | `user_u_` |
//! | guest | `guest_` |
//! | not yet resolved | (empty) |

use serde::{Deserialize, Serialize};

use crate::error::SubstrateError;
use crate::substrate::KeyValueStore;

const GUEST_PREFIX: &str = "guest_";

/// Who the stored data belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Identity {
    /// Identity has not been resolved yet
    Unresolved,
    /// Anonymous local user
    Guest,
    /// Signed-in user with a stable identifier
    User(String),
}

impl Identity {
    /// Shorthand for a signed-in identity
    pub fn user(id: impl Into<String>) -> Self {
        Identity::User(id.into())
    }

    /// The namespace this identity stores its collections under
    pub fn namespace(&self) -> Namespace {
        let prefix = match self {
            Identity::Unresolved => String::new(),
            Identity::Guest => GUEST_PREFIX.to_string(),
            Identity::User(id) => user_prefix(id),
        };
        Namespace { prefix }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }
}

/// A storage-key prefix shared by every collection of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// The prefix prepended to collection names
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Storage key for one collection
    pub fn key(&self, collection: &str) -> String {
        format!("{}{}", self.prefix, collection)
    }
}

fn user_prefix(id: &str) -> String {
    format!("user_{}_", id)
}

/// Outcome of moving guest data into a signed-in namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Guest keys whose value was copied to the user namespace
    pub copied: Vec<String>,
    /// Guest keys dropped because the user already had data under that name
    pub skipped: Vec<String>,
}

/// Move every `guest_*` key into the namespace of `user_id`.
///
/// Existing user data wins: a guest value is only copied when the target key
/// is absent. Guest keys are removed either way.
pub fn migrate_guest_data(
    substrate: &dyn KeyValueStore,
    user_id: &str,
) -> Result<MigrationReport, SubstrateError> {
    let target_prefix = user_prefix(user_id);
    let mut report = MigrationReport::default();

    for key in substrate.keys()? {
        let Some(collection) = key.strip_prefix(GUEST_PREFIX) else {
            continue;
        };
        let Some(value) = substrate.get(&key)? else {
            continue;
        };

        let target = format!("{}{}", target_prefix, collection);
        if substrate.get(&target)?.is_none() {
            substrate.set(&target, &value)?;
            report.copied.push(key.clone());
        } else {
            report.skipped.push(key.clone());
        }
        substrate.remove(&key)?;
    }

    tracing::debug!(
        user_id,
        copied = report.copied.len(),
        skipped = report.skipped.len(),
        "Migrated guest data"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::MemoryKeyValueStore;
    use rstest::rstest;

    #[rstest]
    #[case(Identity::user("abc123"), "user_abc123_todoItems")]
    #[case(Identity::Guest, "guest_todoItems")]
    #[case(Identity::Unresolved, "todoItems")]
    fn key_naming(#[case] identity: Identity, #[case] expected: &str) {
        assert_eq!(identity.namespace().key("todoItems"), expected);
    }

    #[test]
    fn migration_copies_and_removes_guest_keys() {
        let kv = MemoryKeyValueStore::new();
        kv.set("guest_tags", "[1]").unwrap();
        kv.set("guest_views", "[2]").unwrap();
        kv.set("user_u1_views", "[9]").unwrap();
        kv.set("isGuestUser", "true").unwrap();

        let report = migrate_guest_data(&kv, "u1").unwrap();

        assert_eq!(report.copied, vec!["guest_tags"]);
        assert_eq!(report.skipped, vec!["guest_views"]);
        assert_eq!(kv.get("user_u1_tags").unwrap().as_deref(), Some("[1]"));
        assert_eq!(kv.get("user_u1_views").unwrap().as_deref(), Some("[9]"));
        assert_eq!(kv.get("guest_tags").unwrap(), None);
        assert_eq!(kv.get("guest_views").unwrap(), None);
        assert_eq!(kv.get("isGuestUser").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn identity_serde() {
        let json = serde_json::to_string(&Identity::user("u1")).unwrap();
        assert_eq!(json, r#"{"kind":"user","id":"u1"}"#);
        let back: Identity = serde_json::from_str(r#"{"kind":"guest"}"#).unwrap();
        assert_eq!(back, Identity::Guest);
    }
}

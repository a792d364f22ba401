use std::sync::mpsc::Receiver;
use std::sync::Arc;

use crate::collection::{Collection, LoadOutcome};
use crate::error::Result;
use crate::event::StoreEvent;
use crate::id::IdGenerator;
use crate::namespace::Namespace;
use crate::record::{day_of, NewRecord, Record, RecordFields};
use crate::substrate::KeyValueStore;

/// CRUD and lookup over one homogeneous collection of records.
///
/// One instance exists per entity type; `T` is the entity-specific field set.
/// All lookups are linear scans.
pub struct RecordStore<T: RecordFields> {
    records: Collection<Record<T>>,
    ids: IdGenerator,
    seed: Vec<Record<T>>,
}

impl<T: RecordFields> RecordStore<T> {
    /// Create a store for `collection`, persisted through `substrate`.
    pub fn new(collection: impl Into<String>, substrate: Arc<dyn KeyValueStore>) -> Self {
        Self {
            records: Collection::new(collection, substrate),
            ids: IdGenerator::default(),
            seed: Vec::new(),
        }
    }

    /// Use `ids` for identifiers assigned by `add`
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Records installed (and persisted) when a namespace has no stored value
    pub fn with_seed(mut self, seed: Vec<Record<T>>) -> Self {
        self.seed = seed;
        self
    }

    pub fn collection(&self) -> &str {
        self.records.name()
    }

    pub fn storage_key(&self) -> &str {
        self.records.storage_key()
    }

    /// Read the collection stored for `namespace`, replacing in-memory state.
    pub fn load(&mut self, namespace: &Namespace) -> LoadOutcome {
        let seed = &self.seed;
        self.records.load(namespace, || seed.clone())
    }

    /// Assign an id to `new`, append it, and persist.
    pub fn add(&mut self, new: NewRecord<T>) -> Result<Record<T>> {
        let records = &self.records;
        let id = self.ids.generate_unique(|candidate| records.contains(candidate));
        let record = Record::from_new(id, new);
        self.records.push(record.clone())?;
        tracing::debug!(collection = %self.records.name(), id = %record.id, "Added record");
        Ok(record)
    }

    /// Replace the record with the same id. Unknown ids are a no-op
    /// returning `false`.
    pub fn update(&mut self, record: Record<T>) -> Result<bool> {
        let id = record.id.clone();
        let replaced = self.records.replace(record)?;
        if !replaced {
            tracing::debug!(collection = %self.records.name(), id = %id, "Update of unknown record ignored");
        }
        Ok(replaced)
    }

    /// Remove the record with `id`. Unknown ids are a no-op returning `false`.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        self.records.remove(id)
    }

    /// Remove every record matching `predicate`, returning the removed ones.
    pub fn remove_where<P>(&mut self, predicate: P) -> Result<Vec<Record<T>>>
    where
        P: FnMut(&Record<T>) -> bool,
    {
        self.records.remove_where(predicate)
    }

    pub fn find_all(&self) -> &[Record<T>] {
        self.records.entries()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Record<T>> {
        self.records.get(id)
    }

    /// Records referencing `tag_id`.
    pub fn find_by_tag(&self, tag_id: &str) -> Vec<&Record<T>> {
        self.records
            .entries()
            .iter()
            .filter(|r| r.has_tag(tag_id))
            .collect()
    }

    /// Records whose date falls on the same calendar day as `date`.
    ///
    /// Only the segment before `T` is compared, as plain strings.
    pub fn find_by_date(&self, date: &str) -> Vec<&Record<T>> {
        let day = day_of(date);
        self.records
            .entries()
            .iter()
            .filter(|r| r.day() == day)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Receive an event for every committed change.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.records.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::id::IdFormat;
    use crate::namespace::Identity;
    use crate::record::TagRef;
    use crate::substrate::MemoryKeyValueStore;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Mood {
        score: u8,
    }

    fn store() -> (Arc<MemoryKeyValueStore>, RecordStore<Mood>) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let mut s = RecordStore::new("moodEntries", kv.clone() as Arc<dyn KeyValueStore>);
        s.load(&Identity::user("u1").namespace());
        (kv, s)
    }

    fn mood(date: &str, score: u8) -> NewRecord<Mood> {
        NewRecord::new(date, Mood { score })
    }

    #[test]
    fn add_assigns_id_and_persists() {
        let (kv, mut s) = store();
        let record = s.add(mood("2024-01-01T08:00:00Z", 4)).unwrap();

        assert!(!record.id.is_empty());
        assert_eq!(s.find_by_id(&record.id), Some(&record));
        let stored = kv.get("user_u1_moodEntries").unwrap().unwrap();
        assert!(stored.contains(&record.id));
    }

    #[test]
    fn reload_recovers_records() {
        let (kv, mut s) = store();
        let record = s
            .add(mood("2024-01-01T08:00:00Z", 2).with_notes("tired"))
            .unwrap();

        let mut fresh = RecordStore::<Mood>::new("moodEntries", kv as Arc<dyn KeyValueStore>);
        fresh.load(&Identity::user("u1").namespace());
        assert_eq!(fresh.find_by_id(&record.id), Some(&record));
    }

    #[test]
    fn update_replaces_in_place() {
        let (_kv, mut s) = store();
        let a = s.add(mood("2024-01-01", 1)).unwrap();
        let b = s.add(mood("2024-01-02", 2)).unwrap();

        let mut changed = a.clone();
        changed.fields.score = 5;
        assert!(s.update(changed.clone()).unwrap());

        assert_eq!(s.find_all(), &[changed, b]);
    }

    #[test]
    fn update_unknown_is_noop() {
        let (kv, mut s) = store();
        s.add(mood("2024-01-01", 1)).unwrap();
        let before = kv.get("user_u1_moodEntries").unwrap();

        let ghost = Record::from_new("missing".into(), mood("2024-01-01", 3));
        assert!(!s.update(ghost).unwrap());
        assert_eq!(s.len(), 1);
        assert_eq!(kv.get("user_u1_moodEntries").unwrap(), before);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let (_kv, mut s) = store();
        let a = s.add(mood("2024-01-01", 1)).unwrap();
        assert!(!s.remove("nope").unwrap());
        assert_eq!(s.find_all(), &[a]);
    }

    #[test]
    fn find_by_tag_and_date() {
        let (_kv, mut s) = store();
        let tagged = s
            .add(mood("2024-01-01T23:59:00Z", 3).with_tags(vec![TagRef::new("t1")]))
            .unwrap();
        s.add(mood("2024-01-02T00:00:00Z", 4)).unwrap();

        assert_eq!(s.find_by_tag("t1"), vec![&tagged]);
        assert!(s.find_by_tag("t2").is_empty());
        assert_eq!(s.find_by_date("2024-01-01T12:00:00Z"), vec![&tagged]);
        assert_eq!(s.find_by_date("2024-01-02").len(), 1);
        assert!(s.find_by_date("2024-01-03").is_empty());
    }

    #[test]
    fn remove_where_returns_removed() {
        let (_kv, mut s) = store();
        s.add(mood("2024-01-01", 1)).unwrap();
        s.add(mood("2024-01-02", 5)).unwrap();
        s.add(mood("2024-01-03", 1)).unwrap();

        let removed = s.remove_where(|r| r.fields.score == 1).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn add_fails_when_quota_exhausted() {
        let kv = Arc::new(MemoryKeyValueStore::with_quota(40));
        let mut s = RecordStore::<Mood>::new("moodEntries", kv as Arc<dyn KeyValueStore>);
        s.load(&Identity::Guest.namespace());

        let err = s.add(mood("2024-01-01T08:00:00Z", 4)).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(s.is_empty());
    }

    #[test]
    fn seed_applies_only_to_empty_namespace() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let seed = vec![Record::from_new("seed-1".into(), mood("2024-01-01", 3))];
        let mut s = RecordStore::new("moodEntries", kv.clone()).with_seed(seed);

        let outcome = s.load(&Identity::Guest.namespace());
        assert_eq!(outcome, LoadOutcome::Seeded { count: 1, persisted: true });

        s.remove("seed-1").unwrap();
        let outcome = s.load(&Identity::Guest.namespace());
        assert_eq!(outcome, LoadOutcome::Unchanged { count: 0 });
    }

    #[test]
    fn thousand_adds_have_distinct_ids() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let mut s = RecordStore::<Mood>::new("moodEntries", kv)
            .with_ids(IdGenerator::new(IdFormat::CompactHex));
        s.load(&Identity::Guest.namespace());

        for i in 0..1000 {
            s.add(mood("2024-01-01", (i % 5) as u8)).unwrap();
        }
        let ids: HashSet<&str> = s.find_all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 1000);
    }

    proptest! {
        #[test]
        fn update_is_idempotent(score in 0u8..=10, notes in proptest::option::of("[a-z ]{0,12}")) {
            let (_kv, mut s) = store();
            let original = s.add(mood("2024-01-01", 1)).unwrap();
            s.add(mood("2024-01-02", 2)).unwrap();

            let mut changed = original.clone();
            changed.fields.score = score;
            changed.notes = notes;

            s.update(changed.clone()).unwrap();
            let once = s.find_all().to_vec();
            s.update(changed).unwrap();
            prop_assert_eq!(s.find_all(), once.as_slice());
        }
    }
}

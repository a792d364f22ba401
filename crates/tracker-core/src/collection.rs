//! An ordered list of entries persisted as one substrate value.
//!
//! Every mutation builds the next list, writes it, and only then swaps it in,
//! so a failed write leaves the in-memory list exactly as it was.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ReadIssue, Result, StoreError};
use crate::event::{StoreEvent, Subscribers};
use crate::namespace::Namespace;
use crate::substrate::KeyValueStore;

/// An element of a persisted collection.
pub trait Entry: Clone + PartialEq + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

/// What `load` found in the substrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored entries replaced the in-memory list
    Loaded { count: usize },
    /// Stored entries equal the in-memory list; nothing was replaced
    Unchanged { count: usize },
    /// No stored value; the seed list was installed
    Seeded { count: usize, persisted: bool },
    /// No stored value and nothing to seed
    Empty,
    /// The stored value could not be used; the list is now empty
    Recovered(ReadIssue),
}

impl LoadOutcome {
    /// Number of entries held after the load
    pub fn count(&self) -> usize {
        match self {
            LoadOutcome::Loaded { count }
            | LoadOutcome::Unchanged { count }
            | LoadOutcome::Seeded { count, .. } => *count,
            LoadOutcome::Empty | LoadOutcome::Recovered(_) => 0,
        }
    }
}

/// A named list of entries persisted under a namespaced key.
pub struct Collection<E> {
    name: String,
    key: String,
    substrate: Arc<dyn KeyValueStore>,
    entries: Vec<E>,
    subscribers: Subscribers,
}

impl<E: Entry> Collection<E> {
    /// Create an empty collection keyed by its bare name until loaded.
    pub fn new(name: impl Into<String>, substrate: Arc<dyn KeyValueStore>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            substrate,
            entries: Vec::new(),
            subscribers: Subscribers::default(),
        }
    }

    /// Collection name (the storage-key suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full storage key currently in use
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Receive an event for every committed change.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }

    /// Switch to `namespace` and read its stored entries.
    ///
    /// `seed` is only consulted when the key is absent. Unreadable or
    /// malformed values leave the collection empty.
    pub fn load<F>(&mut self, namespace: &Namespace, seed: F) -> LoadOutcome
    where
        F: FnOnce() -> Vec<E>,
    {
        self.key = namespace.key(&self.name);

        let outcome = match self.substrate.get(&self.key) {
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read collection");
                self.install(Vec::new());
                LoadOutcome::Recovered(ReadIssue::Unavailable(e.to_string()))
            }
            Ok(Some(raw)) => match serde_json::from_str::<Vec<E>>(&raw) {
                Ok(entries) => {
                    let entries = dedupe_ids(&self.key, entries);
                    let count = entries.len();
                    if self.install(entries) {
                        LoadOutcome::Loaded { count }
                    } else {
                        LoadOutcome::Unchanged { count }
                    }
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "Stored collection is malformed");
                    self.install(Vec::new());
                    LoadOutcome::Recovered(ReadIssue::Malformed(e.to_string()))
                }
            },
            Ok(None) => {
                let seeded = seed();
                if seeded.is_empty() {
                    self.install(Vec::new());
                    LoadOutcome::Empty
                } else {
                    let count = seeded.len();
                    let persisted = match self.write(&seeded) {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::error!(key = %self.key, error = %e, "Failed to persist seed");
                            false
                        }
                    };
                    self.install(seeded);
                    LoadOutcome::Seeded { count, persisted }
                }
            }
        };

        tracing::debug!(key = %self.key, ?outcome, "Loaded collection");
        outcome
    }

    /// Append an entry.
    pub fn push(&mut self, entry: E) -> Result<()> {
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)
    }

    /// Replace the entry with the same id in place. Returns false (and writes
    /// nothing) when no entry matches.
    pub fn replace(&mut self, entry: E) -> Result<bool> {
        let Some(index) = self.entries.iter().position(|e| e.id() == entry.id()) else {
            return Ok(false);
        };
        let mut next = self.entries.clone();
        next[index] = entry;
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the entry with `id`. Returns false when absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        Ok(!self.remove_where(|e| e.id() == id)?.is_empty())
    }

    /// Remove every entry matching `predicate` and return them.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Result<Vec<E>>
    where
        P: FnMut(&E) -> bool,
    {
        let (removed, kept): (Vec<E>, Vec<E>) =
            self.entries.iter().cloned().partition(|e| predicate(e));
        if removed.is_empty() {
            return Ok(removed);
        }
        self.commit(kept)?;
        Ok(removed)
    }

    /// Apply an arbitrary edit to a copy of the list and commit it.
    pub fn modify<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<E>),
    {
        let mut next = self.entries.clone();
        edit(&mut next);
        if next == self.entries {
            return Ok(());
        }
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<E>) -> Result<()> {
        self.write(&next)?;
        let previous = std::mem::replace(&mut self.entries, next);
        tracing::debug!(
            key = %self.key,
            before = previous.len(),
            after = self.entries.len(),
            "Committed collection"
        );
        self.emit_diff(&previous);
        Ok(())
    }

    fn write(&self, entries: &[E]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.substrate.set(&self.key, &json).map_err(|source| {
            tracing::error!(key = %self.key, error = %source, "Persistence write failed");
            StoreError::Write {
                key: self.key.clone(),
                source,
            }
        })
    }

    /// Install loaded entries; returns whether the list actually changed.
    fn install(&mut self, entries: Vec<E>) -> bool {
        if self.entries == entries {
            return false;
        }
        self.entries = entries;
        self.subscribers.emit(StoreEvent::Reloaded {
            collection: self.name.clone(),
            count: self.entries.len(),
        });
        true
    }

    fn emit_diff(&mut self, previous: &[E]) {
        let before: HashMap<&str, &E> = previous.iter().map(|e| (e.id(), e)).collect();
        let after: HashSet<&str> = self.entries.iter().map(|e| e.id()).collect();

        let removed: Vec<String> = previous
            .iter()
            .filter(|e| !after.contains(e.id()))
            .map(|e| e.id().to_string())
            .collect();

        let mut events = Vec::new();
        if !removed.is_empty() {
            events.push(StoreEvent::Removed {
                collection: self.name.clone(),
                ids: removed,
            });
        }
        for entry in &self.entries {
            match before.get(entry.id()) {
                None => events.push(StoreEvent::Added {
                    collection: self.name.clone(),
                    id: entry.id().to_string(),
                }),
                Some(old) if *old != entry => events.push(StoreEvent::Updated {
                    collection: self.name.clone(),
                    id: entry.id().to_string(),
                }),
                Some(_) => {}
            }
        }

        for event in events {
            self.subscribers.emit(event);
        }
    }
}

/// Drop entries repeating an earlier id, keeping the first occurrence.
fn dedupe_ids<E: Entry>(key: &str, entries: Vec<E>) -> Vec<E> {
    let mut seen = HashSet::new();
    let total = entries.len();
    let unique: Vec<E> = entries
        .into_iter()
        .filter(|e| seen.insert(e.id().to_string()))
        .collect();
    if unique.len() != total {
        tracing::warn!(key, dropped = total - unique.len(), "Dropped entries with duplicate ids");
    }
    unique
}

//! One identity's view of every store.
//!
//! The session owns the six record stores plus the tag and view registries,
//! all sharing one substrate. Changing identity reloads each of them from the
//! new namespace independently; there is no cross-store transaction.

use std::sync::Arc;

use tracker_core::{
    migrate_guest_data, Identity, KeyValueStore, LoadOutcome, MigrationReport, ReadIssue,
    RecordStore,
};
use tracker_domain::{BloodPressure, CalendarEvent, EntityKind, Medication, ScreenTime, Sleep, Todo};
use tracker_tags::{TagRegistry, TAGS_COLLECTION};

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::views::{ViewDeletion, ViewRegistry, VIEWS_COLLECTION};

/// Per-collection outcome of a (re)load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub outcomes: Vec<(&'static str, LoadOutcome)>,
}

impl LoadReport {
    pub fn get(&self, collection: &str) -> Option<&LoadOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| *name == collection)
            .map(|(_, outcome)| outcome)
    }

    /// Collections whose stored value had to be discarded
    pub fn recovered(&self) -> impl Iterator<Item = (&'static str, &ReadIssue)> + '_ {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            LoadOutcome::Recovered(issue) => Some((*name, issue)),
            _ => None,
        })
    }
}

/// Result of `sign_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    /// Present when guest data was moved into the user's namespace
    pub migration: Option<MigrationReport>,
    pub load: LoadReport,
}

pub struct TrackerSession {
    substrate: Arc<dyn KeyValueStore>,
    identity: Identity,
    pub sleep: RecordStore<Sleep>,
    pub screen_time: RecordStore<ScreenTime>,
    pub medication: RecordStore<Medication>,
    pub todos: RecordStore<Todo>,
    pub calendar: RecordStore<CalendarEvent>,
    pub blood_pressure: RecordStore<BloodPressure>,
    pub tags: TagRegistry,
    pub views: ViewRegistry,
}

impl TrackerSession {
    /// Build every store over `substrate` and load `identity`'s data.
    pub fn open(
        substrate: Arc<dyn KeyValueStore>,
        identity: Identity,
        config: &TrackerConfig,
    ) -> Result<(Self, LoadReport)> {
        config.validate()?;
        let ids = config.ids.generator();

        let mut session = Self {
            sleep: RecordStore::new(EntityKind::Sleep.collection(), substrate.clone()).with_ids(ids),
            screen_time: RecordStore::new(EntityKind::ScreenTime.collection(), substrate.clone())
                .with_ids(ids),
            medication: RecordStore::new(EntityKind::Medication.collection(), substrate.clone())
                .with_ids(ids),
            todos: RecordStore::new(EntityKind::Todo.collection(), substrate.clone()).with_ids(ids),
            calendar: RecordStore::new(EntityKind::Calendar.collection(), substrate.clone())
                .with_ids(ids),
            blood_pressure: RecordStore::new(
                EntityKind::BloodPressure.collection(),
                substrate.clone(),
            )
            .with_ids(ids),
            tags: TagRegistry::new(substrate.clone())
                .with_ids(ids)
                .with_palette(config.tags.palette())
                .with_default_seed(config.seeding.default_tags),
            views: ViewRegistry::new(substrate.clone())
                .with_ids(ids)
                .with_default_seed(config.seeding.default_views),
            substrate,
            identity,
        };
        let report = session.reload();
        Ok((session, report))
    }

    /// Open a session over the SQLite file named by `config`.
    #[cfg(feature = "sqlite")]
    pub fn open_sqlite(config: &TrackerConfig, identity: Identity) -> Result<(Self, LoadReport)> {
        use crate::error::SessionError;
        use tracker_core::SqliteKeyValueStore;

        let path = config
            .storage
            .database_path()
            .ok_or(SessionError::NoDatabasePath)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "Opening SQLite substrate");
        let substrate = Arc::new(SqliteKeyValueStore::open(&path)?);
        Self::open(substrate, identity, config)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn substrate(&self) -> &Arc<dyn KeyValueStore> {
        &self.substrate
    }

    /// Reload every store from the current identity's namespace.
    pub fn reload(&mut self) -> LoadReport {
        let ns = self.identity.namespace();
        let outcomes = vec![
            (EntityKind::Sleep.collection(), self.sleep.load(&ns)),
            (EntityKind::ScreenTime.collection(), self.screen_time.load(&ns)),
            (EntityKind::Medication.collection(), self.medication.load(&ns)),
            (EntityKind::Todo.collection(), self.todos.load(&ns)),
            (EntityKind::Calendar.collection(), self.calendar.load(&ns)),
            (EntityKind::BloodPressure.collection(), self.blood_pressure.load(&ns)),
            (TAGS_COLLECTION, self.tags.load(&ns)),
            (VIEWS_COLLECTION, self.views.load(&ns)),
        ];
        let report = LoadReport { outcomes };
        for (collection, issue) in report.recovered() {
            tracing::warn!(collection, %issue, "Collection reset after unreadable data");
        }
        tracing::debug!(prefix = ns.prefix(), "Reloaded session");
        report
    }

    /// Switch to `identity` and reload every store.
    pub fn switch_identity(&mut self, identity: Identity) -> LoadReport {
        tracing::debug!(from = ?self.identity, to = ?identity, "Switching identity");
        self.identity = identity;
        self.reload()
    }

    /// Continue as an anonymous local user.
    pub fn continue_as_guest(&mut self) -> LoadReport {
        self.switch_identity(Identity::Guest)
    }

    /// Sign in as `user_id`, first moving guest data over if the session was
    /// a guest.
    pub fn sign_in(&mut self, user_id: &str) -> Result<SignIn> {
        let migration = if self.identity.is_guest() {
            Some(migrate_guest_data(self.substrate.as_ref(), user_id)?)
        } else {
            None
        };
        let load = self.switch_identity(Identity::user(user_id));
        Ok(SignIn { migration, load })
    }

    /// Drop back to the unresolved identity.
    pub fn sign_out(&mut self) -> LoadReport {
        self.switch_identity(Identity::Unresolved)
    }

    /// Delete a view and every to-do item attached to it.
    pub fn delete_view(&mut self, id: &str) -> tracker_core::Result<ViewDeletion> {
        self.views.delete_view(id, &mut self.todos)
    }
}

//! Dashboard view descriptors and the view-to-todo cascade.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracker_core::{
    Collection, Entry, IdGenerator, KeyValueStore, LoadOutcome, Namespace, RecordFields,
    RecordId, RecordStore, Result, StoreEvent, ViewScoped,
};
use tracker_domain::EntityKind;

/// Storage-key suffix of the view collection
pub const VIEWS_COLLECTION: &str = "views";

/// Kinds seeded as views on the very first load, in display order.
const DEFAULT_VIEW_KINDS: [EntityKind; 5] = [
    EntityKind::Sleep,
    EntityKind::ScreenTime,
    EntityKind::Medication,
    EntityKind::Todo,
    EntityKind::Calendar,
];

/// One panel on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub title: String,
    pub visible: bool,
    /// Display position; contiguous from 0 after a deletion
    pub order: u32,
}

impl Entry for ViewDescriptor {
    fn id(&self) -> &str {
        &self.id
    }
}

/// What `delete_view` removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewDeletion {
    /// The deleted descriptor, or `None` if no view had the id
    pub view: Option<ViewDescriptor>,
    /// Ids of to-do records that belonged to the view
    pub removed_todos: Vec<RecordId>,
}

fn default_views(ids: &IdGenerator) -> Vec<ViewDescriptor> {
    DEFAULT_VIEW_KINDS
        .iter()
        .enumerate()
        .map(|(order, kind)| ViewDescriptor {
            id: ids.generate(),
            kind: *kind,
            title: kind.default_title().to_string(),
            visible: true,
            order: order as u32,
        })
        .collect()
}

/// Stable sort by `order`, then assign 0..n.
fn renumber(views: &mut [ViewDescriptor]) {
    views.sort_by_key(|v| v.order);
    for (position, view) in views.iter_mut().enumerate() {
        view.order = position as u32;
    }
}

/// Owns the ordered view list of the active namespace.
///
/// The only component that deletes records in another store: removing a view
/// removes every to-do item attached to it.
pub struct ViewRegistry {
    views: Collection<ViewDescriptor>,
    ids: IdGenerator,
    seed_defaults: bool,
    loaded_once: bool,
}

impl ViewRegistry {
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        Self {
            views: Collection::new(VIEWS_COLLECTION, substrate),
            ids: IdGenerator::default(),
            seed_defaults: true,
            loaded_once: false,
        }
    }

    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Whether the first load may seed the default views
    pub fn with_default_seed(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    pub fn storage_key(&self) -> &str {
        self.views.storage_key()
    }

    /// Load the views of `namespace`.
    ///
    /// Defaults are seeded only on the first load of this registry. Switching
    /// later to a namespace without stored views yields an empty list.
    pub fn load(&mut self, namespace: &Namespace) -> LoadOutcome {
        let seed = self.seed_defaults && !self.loaded_once;
        self.loaded_once = true;
        let ids = self.ids;
        self.views.load(namespace, || {
            if seed {
                default_views(&ids)
            } else {
                Vec::new()
            }
        })
    }

    /// Append a visible view at the end of the list.
    pub fn add_view(&mut self, kind: EntityKind, title: &str) -> Result<ViewDescriptor> {
        let views = &self.views;
        let id = self.ids.generate_unique(|candidate| views.contains(candidate));
        let view = ViewDescriptor {
            id,
            kind,
            title: title.trim().to_string(),
            visible: true,
            order: self.views.len() as u32,
        };
        self.views.push(view.clone())?;
        tracing::debug!(id = %view.id, kind = %view.kind, "Added view");
        Ok(view)
    }

    /// Replace the view with the same id; `false` if there is none.
    pub fn update_view(&mut self, view: ViewDescriptor) -> Result<bool> {
        self.views.replace(view)
    }

    /// Delete view `id` together with every to-do item attached to it.
    ///
    /// The to-do items are removed and persisted first. Remaining views are
    /// renumbered 0..n. An unknown id still clears orphaned items but leaves
    /// the view list untouched. If the view write fails after the items were
    /// removed, the items stay removed.
    pub fn delete_view<T>(&mut self, id: &str, todos: &mut RecordStore<T>) -> Result<ViewDeletion>
    where
        T: RecordFields + ViewScoped,
    {
        let removed_todos: Vec<RecordId> = todos
            .remove_where(|record| record.view_id() == Some(id))?
            .into_iter()
            .map(|record| record.id)
            .collect();

        let mut view = None;
        self.views.modify(|views| {
            if let Some(position) = views.iter().position(|v| v.id == id) {
                view = Some(views.remove(position));
                renumber(views);
            }
        })?;

        tracing::debug!(
            id,
            found = view.is_some(),
            removed_todos = removed_todos.len(),
            "Deleted view"
        );
        Ok(ViewDeletion {
            view,
            removed_todos,
        })
    }

    /// Flip visibility of view `id`; returns the new value, `None` if unknown.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(mut view) = self.views.get(id).cloned() else {
            return Ok(None);
        };
        view.visible = !view.visible;
        let visible = view.visible;
        self.views.replace(view)?;
        Ok(Some(visible))
    }

    /// Give each listed view its position in `ordered_ids` as its order.
    ///
    /// Unlisted views keep their order; the list is then sorted by order.
    pub fn reorder<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> Result<()> {
        self.views.modify(|views| {
            for view in views.iter_mut() {
                // Last occurrence wins for repeated ids
                if let Some(position) = ordered_ids.iter().rposition(|id| id.as_ref() == view.id) {
                    view.order = position as u32;
                }
            }
            views.sort_by_key(|v| v.order);
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ViewDescriptor> {
        self.views.get(id)
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        self.views.entries()
    }

    /// Visible views in display order
    pub fn visible(&self) -> Vec<&ViewDescriptor> {
        let mut visible: Vec<&ViewDescriptor> =
            self.views.entries().iter().filter(|v| v.visible).collect();
        visible.sort_by_key(|v| v.order);
        visible
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.views.subscribe()
    }
}

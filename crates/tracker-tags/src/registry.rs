//! Per-identity set of tags.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use tracker_core::{
    Collection, IdGenerator, KeyValueStore, LoadOutcome, Namespace, Result, StoreEvent, TagRef,
};

use crate::config::{default_tags, Palette};
use crate::tag::Tag;

/// Storage-key suffix of the tag collection
pub const TAGS_COLLECTION: &str = "tags";

/// Owns the flat tag set of the active namespace.
///
/// Deleting a tag never touches records that reference it; such references
/// simply stop resolving.
pub struct TagRegistry {
    tags: Collection<Tag>,
    ids: IdGenerator,
    palette: Palette,
    seed_defaults: bool,
}

impl TagRegistry {
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tags: Collection::new(TAGS_COLLECTION, substrate),
            ids: IdGenerator::default(),
            palette: Palette::default(),
            seed_defaults: true,
        }
    }

    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Whether namespaces without stored tags start with the default set
    pub fn with_default_seed(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    pub fn storage_key(&self) -> &str {
        self.tags.storage_key()
    }

    /// Load the tags of `namespace`, seeding defaults on first use.
    pub fn load(&mut self, namespace: &Namespace) -> LoadOutcome {
        let ids = self.ids;
        let seed = self.seed_defaults;
        self.tags.load(namespace, || {
            if seed {
                default_tags(&ids)
            } else {
                Vec::new()
            }
        })
    }

    /// Create a tag with a palette color and persist it.
    pub fn add_tag(&mut self, name: &str) -> Result<Tag> {
        let tags = &self.tags;
        let id = self.ids.generate_unique(|candidate| tags.contains(candidate));
        let tag = Tag::new(id, name, self.palette.pick());
        self.tags.push(tag.clone())?;
        tracing::debug!(id = %tag.id, name = %tag.name, "Added tag");
        Ok(tag)
    }

    /// Replace the tag with the same id; `false` if there is none.
    pub fn update_tag(&mut self, tag: Tag) -> Result<bool> {
        self.tags.replace(tag)
    }

    /// Remove the tag with `id`; `false` if there is none.
    pub fn delete_tag(&mut self, id: &str) -> Result<bool> {
        self.tags.remove(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.entries()
    }

    /// Tags that `references` still resolve to, in reference order.
    /// Dangling references are skipped.
    pub fn resolve<'a>(&'a self, references: &'a [TagRef]) -> impl Iterator<Item = &'a Tag> + 'a {
        references.iter().filter_map(move |r| self.find_by_id(&r.id))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.tags.subscribe()
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::collection::Entry;
use crate::id::RecordId;

/// Entity-specific fields carried by a [`Record`].
///
/// Blanket-implemented for every type with the required capabilities; it only
/// names the bound set.
pub trait RecordFields: Clone + PartialEq + Serialize + DeserializeOwned {}

impl<T> RecordFields for T where T: Clone + PartialEq + Serialize + DeserializeOwned {}

/// Fields that tie a record to a dashboard view.
pub trait ViewScoped {
    fn view_id(&self) -> Option<&str>;
}

/// Reference to a tag by id.
///
/// `name` and `color` are an optional display snapshot taken when the tag was
/// attached. They are never used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TagRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }
}

/// A trackable record: universal metadata plus entity fields.
///
/// Serialized flat, so `{"id", "date", "tags", "notes", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: RecordId,
    /// ISO-8601 timestamp
    pub date: String,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Build a record from its unsaved form.
    pub fn from_new(id: RecordId, new: NewRecord<T>) -> Self {
        Self {
            id,
            date: new.date,
            tags: new.tags,
            notes: new.notes,
            fields: new.fields,
        }
    }

    /// Whether any tag reference points at `tag_id`
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// The calendar-day part of `date` (everything before `T`)
    pub fn day(&self) -> &str {
        day_of(&self.date)
    }
}

impl<T: RecordFields> Entry for Record<T> {
    fn id(&self) -> &str {
        &self.id
    }
}

impl<T: ViewScoped> ViewScoped for Record<T> {
    fn view_id(&self) -> Option<&str> {
        self.fields.view_id()
    }
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord<T> {
    pub date: String,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> NewRecord<T> {
    pub fn new(date: impl Into<String>, fields: T) -> Self {
        Self {
            date: date.into(),
            tags: Vec::new(),
            notes: None,
            fields,
        }
    }

    pub fn with_tags(mut self, tags: Vec<TagRef>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Calendar-day segment of an ISO-8601 string.
pub fn day_of(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

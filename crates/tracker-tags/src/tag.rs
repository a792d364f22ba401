//! Core tag types.

use serde::{Deserialize, Serialize};
use tracker_core::{Entry, TagRef};

/// A user-defined label shared by records of every entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Record))]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Hex color, e.g. `#F44336`
    pub color: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// A reference to this tag carrying a name/color snapshot.
    pub fn to_ref(&self) -> TagRef {
        TagRef {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            color: Some(self.color.clone()),
        }
    }

    /// Whether `reference` points at this tag
    pub fn is_referenced_by(&self, reference: &TagRef) -> bool {
        reference.id == self.id
    }
}

impl Entry for Tag {
    fn id(&self) -> &str {
        &self.id
    }
}

impl From<&Tag> for TagRef {
    fn from(tag: &Tag) -> Self {
        tag.to_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ref_snapshot() {
        let tag = Tag::new("t1", "Work", "#2196F3");
        let r = TagRef::from(&tag);
        assert_eq!(r.id, "t1");
        assert_eq!(r.name.as_deref(), Some("Work"));
        assert!(tag.is_referenced_by(&r));
    }

    #[test]
    fn matching_ignores_stale_snapshot() {
        let tag = Tag::new("t1", "Work", "#2196F3");
        let stale = TagRef {
            id: "t1".into(),
            name: Some("Old name".into()),
            color: None,
        };
        assert!(tag.is_referenced_by(&stale));
        assert!(!tag.is_referenced_by(&TagRef::new("t2")));
    }

    #[test]
    fn tag_serde_shape() {
        let tag = Tag::new("t1", "Health", "#FF9800");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r##"{"id":"t1","name":"Health","color":"#FF9800"}"##);
    }
}

//! Default tag color palette and starter tags.

use tracker_core::{random_index, IdGenerator};

use crate::tag::Tag;

/// Colors new tags are drawn from.
pub const DEFAULT_TAG_PALETTE: &[&str] = &[
    "#F44336", // Red
    "#E91E63", // Pink
    "#9C27B0", // Purple
    "#673AB7", // Deep Purple
    "#3F51B5", // Indigo
    "#2196F3", // Blue
    "#03A9F4", // Light Blue
    "#00BCD4", // Cyan
    "#009688", // Teal
    "#4CAF50", // Green
    "#8BC34A", // Light Green
    "#CDDC39", // Lime
    "#FFEB3B", // Yellow
    "#FFC107", // Amber
    "#FF9800", // Orange
    "#FF5722", // Deep Orange
    "#795548", // Brown
    "#9E9E9E", // Grey
    "#607D8B", // Blue Grey
];

/// Tags every new namespace starts with.
pub const DEFAULT_TAGS: &[(&str, &str)] = &[
    ("Important", "#F44336"),
    ("Work", "#2196F3"),
    ("Personal", "#4CAF50"),
    ("Health", "#FF9800"),
];

/// Palette new tag colors are picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette; an empty list falls back to the default palette.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Pick a color at random.
    pub fn pick(&self) -> &str {
        &self.colors[random_index(self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_TAG_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Fresh copies of [`DEFAULT_TAGS`] with newly generated ids.
pub fn default_tags(ids: &IdGenerator) -> Vec<Tag> {
    DEFAULT_TAGS
        .iter()
        .map(|(name, color)| Tag::new(ids.generate(), *name, *color))
        .collect()
}

/// Whether `color` is a `#RRGGBB` hex string.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

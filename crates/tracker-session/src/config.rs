//! Configuration for a tracker session
//!
//! Id format, first-use seeding, the tag color palette, and where the
//! optional SQLite substrate keeps its file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_core::{IdFormat, IdGenerator};
use tracker_tags::{is_hex_color, Palette, DEFAULT_TAG_PALETTE};

/// Session-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Identifier generation
    pub ids: IdConfig,
    /// What new namespaces start with
    pub seeding: SeedingConfig,
    /// Tag appearance
    pub tags: TagConfig,
    /// Persistent storage location
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub format: IdFormat,
}

impl IdConfig {
    pub fn generator(&self) -> IdGenerator {
        IdGenerator::new(self.format)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    /// Seed Important/Work/Personal/Health into namespaces without tags
    pub default_tags: bool,
    /// Seed the five starter views on the first load
    pub default_views: bool,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            default_tags: true,
            default_views: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// `#RRGGBB` colors new tags are drawn from
    pub palette: Vec<String>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_TAG_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TagConfig {
    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path, else `<data_dir>/habit-tracker/store.sqlite3`.
    /// `None` when neither is available.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database_path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("habit-tracker").join("store.sqlite3"))
        })
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tags.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(bad) = self.tags.palette.iter().find(|c| !is_hex_color(c)) {
            return Err(ConfigError::InvalidColor(bad.clone()));
        }
        Ok(())
    }
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tag palette is empty")]
    EmptyPalette,

    #[error("Invalid palette color {0:?}: expected #RRGGBB")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ids.format, IdFormat::Uuid);
        assert!(config.seeding.default_tags);
        assert_eq!(config.tags.palette.len(), 19);
    }

    #[test]
    fn test_json_serialization() {
        let mut config = TrackerConfig::default();
        config.ids.format = IdFormat::CompactHex;
        config.storage.database_path = Some(PathBuf::from("/tmp/t.sqlite3"));
        let json = config.to_json().unwrap();
        assert!(json.contains("compact-hex"));
        assert_eq!(TrackerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrackerConfig::from_json(r#"{"seeding":{"default_views":false}}"#).unwrap();
        assert!(!config.seeding.default_views);
        assert!(config.seeding.default_tags);
        assert_eq!(config.tags, TagConfig::default());
    }

    #[test]
    fn test_invalid_palette() {
        let mut config = TrackerConfig::default();
        config.tags.palette.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));

        config.tags.palette = vec!["#FFFFFF".into(), "red".into()];
        assert_eq!(config.validate(), Err(ConfigError::InvalidColor("red".into())));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let storage = StorageConfig {
            database_path: Some(PathBuf::from("/data/x.db")),
        };
        assert_eq!(storage.database_path(), Some(PathBuf::from("/data/x.db")));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_round_trip() {
        let config = TrackerConfig::from_toml(
            r##"
            [ids]
            format = "compact-hex"

            [tags]
            palette = ["#000000"]
            "##,
        )
        .unwrap();
        assert_eq!(config.ids.format, IdFormat::CompactHex);
        assert_eq!(config.tags.palette, vec!["#000000"]);
        let back = TrackerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}

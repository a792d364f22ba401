//! Record identifier generation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier.
pub type RecordId = String;

/// Shape of generated identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdFormat {
    /// Hyphenated UUID v4 (122 random bits)
    #[default]
    Uuid,
    /// 12 lowercase hex characters (48 random bits)
    CompactHex,
}

/// Produces identifiers in a fixed [`IdFormat`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdGenerator {
    format: IdFormat,
}

impl IdGenerator {
    pub fn new(format: IdFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> IdFormat {
        self.format
    }

    /// Generate a fresh identifier.
    pub fn generate(&self) -> RecordId {
        let uuid = Uuid::new_v4();
        match self.format {
            IdFormat::Uuid => uuid.to_string(),
            // Bytes 0..6 of a v4 UUID carry no version or variant bits.
            IdFormat::CompactHex => uuid.as_bytes()[..6]
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect(),
        }
    }

    /// Generate an identifier not rejected by `taken`.
    pub fn generate_unique(&self, taken: impl Fn(&str) -> bool) -> RecordId {
        loop {
            let id = self.generate();
            if !taken(&id) {
                return id;
            }
            tracing::warn!(id = %id, "Generated id collided, retrying");
        }
    }
}

/// Pick a pseudo-random index below `len` from fresh UUID entropy.
pub fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (Uuid::new_v4().as_u128() % len as u128) as usize
}

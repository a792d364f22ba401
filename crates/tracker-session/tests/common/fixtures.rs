//! Shared session fixtures

use std::path::PathBuf;
use std::sync::Arc;

use tracker_core::{Identity, KeyValueStore, MemoryKeyValueStore};
use tracker_session::{TrackerConfig, TrackerSession};

/// Get the path to a fixture file
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Config with both kinds of first-use seeding turned off
#[allow(dead_code)]
pub fn unseeded_config() -> TrackerConfig {
    let mut config = TrackerConfig::default();
    config.seeding.default_tags = false;
    config.seeding.default_views = false;
    config
}

/// Open a session for `identity` over a fresh in-memory substrate.
#[allow(dead_code)]
pub fn memory_session(
    identity: Identity,
    config: &TrackerConfig,
) -> (Arc<MemoryKeyValueStore>, TrackerSession) {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let session = open_over(kv.clone(), identity, config);
    (kv, session)
}

/// Open a session over an existing substrate.
#[allow(dead_code)]
pub fn open_over(
    kv: Arc<MemoryKeyValueStore>,
    identity: Identity,
    config: &TrackerConfig,
) -> TrackerSession {
    let (session, _) = TrackerSession::open(kv as Arc<dyn KeyValueStore>, identity, config)
        .expect("session opens");
    session
}

/// Write every key of the web-storage fixture into `kv`, values as JSON text.
#[allow(dead_code)]
pub fn load_web_storage(kv: &MemoryKeyValueStore) {
    let raw = std::fs::read_to_string(fixture_path("web_storage.json"))
        .unwrap_or_else(|_| panic!("Failed to load fixture: web_storage.json"));
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).expect("fixture is a JSON object");
    for (key, value) in map {
        kv.set(&key, &value.to_string()).expect("fixture fits");
    }
}

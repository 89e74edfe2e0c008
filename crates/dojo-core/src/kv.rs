// ── Key-value capability ──
//
// A tiny string store for client-side flags. Failures are logged and
// swallowed: losing a flag only means the walkthrough shows again.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use dashmap::DashMap;
use tracing::{debug, warn};

/// Key of the "onboarding walkthrough already shown" flag.
pub const WALKTHROUGH_KEY: &str = "dojo.dashboard.walkthrough-shown";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Best effort; implementations log failures instead of returning them.
    fn set(&self, key: &str, value: &str);
}

/// Returns `true` exactly once per store: the first time it is asked.
/// The flag is recorded before returning.
pub fn first_visit(store: &dyn KeyValueStore) -> bool {
    if store.get(WALKTHROUGH_KEY).is_some() {
        return false;
    }
    store.set(WALKTHROUGH_KEY, "true");
    true
}

// ── In-memory store ──────────────────────────────────────────────────

/// Volatile store, for tests and `--no-persist` sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

// ── File-backed store ────────────────────────────────────────────────

/// A JSON object on disk, loaded once and rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. A missing or
    /// corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = DashMap::new();
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => entries.extend(map),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt key-value file");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no key-value file yet");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "cannot read key-value file"),
        }
        Self { path, entries }
    }

    fn flush(&self) -> std::io::Result<()> {
        let map: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&map).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.flush() {
            warn!(path = %self.path.display(), key, error = %e, "cannot persist key-value entry");
        }
    }
}

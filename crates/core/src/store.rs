//! Persistent preference storage (string keys, string values).
//!
//! This mirrors the browser-local store the shell runs against in
//! production: synchronous, origin-scoped, best-effort. Callers never
//! observe storage failures; those are logged and swallowed. There is no
//! expiry, no encryption, and no cross-instance sync.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

/// Well-known storage keys.
///
/// Keys are namespaced by purpose; no multi-key update is transactional.
pub mod keys {
    /// Bearer token for the backend API.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh token (held for the backend; never rotated by this shell).
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Last explicitly chosen UI language.
    pub const PREFERRED_LANGUAGE: &str = "preferred_language";
    /// In-progress analysis state; cleared on logout.
    pub const ANALYSIS_STATE: &str = "analysis_state";
}

/// Synchronous key/value store for tokens and user preferences.
///
/// Survives restarts of the hosting process but not across devices. Values
/// are stored as plain strings.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and hosts that bring their own persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// JSON-file-backed store under the OS data directory.
///
/// The file is loaded lazily on first access and rewritten on every
/// mutation. A corrupt or missing file starts the store empty.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl FilePreferenceStore {
    /// Store at the default location:
    /// `{app_data_dir}/pagerodeo/preferences.json`.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::at(default_store_path()?))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Option<T> {
        let mut guard = self.entries.lock().ok()?;
        if guard.is_none() {
            *guard = Some(self.load_or_empty());
        }
        guard.as_mut().map(f)
    }

    fn load_or_empty(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(
                    "preference file at {:?} is corrupt, starting empty: {err}",
                    self.path
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if let Err(err) = self.try_persist(entries) {
            tracing::error!("failed to persist preferences: {err:?}");
        }
    }

    fn try_persist(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create preference directory at {:?}", parent)
            })?;
        }

        let raw =
            serde_json::to_string_pretty(entries).context("failed to serialize preferences")?;

        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write preference file at {:?}", self.path))?;

        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.with_entries(|entries| entries.get(key).cloned())
            .flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
            self.persist(entries);
        });
    }

    fn remove(&self, key: &str) {
        let _ = self.with_entries(|entries| {
            entries.remove(key);
            self.persist(entries);
        });
    }
}

/// Resolve the default preference file path:
/// `{app_data_dir}/pagerodeo/preferences.json`.
fn default_store_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("pagerodeo");
    path.push("preferences.json");

    Ok(path)
}

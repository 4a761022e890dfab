//! Injected handle onto the document root.
//!
//! The theme engine and the language registry both mutate document-level
//! state, but each writes a disjoint key namespace (CSS custom properties
//! vs. the `lang`/`dir` attributes), so no coordination is required
//! between them.

use std::collections::HashMap;
use std::sync::Mutex;

/// Write access to root-level style state.
///
/// Implementations must overwrite by key: applying the same input twice
/// leaves the target in an identical state.
pub trait StyleTarget: Send + Sync {
    /// Set a CSS custom property (e.g. `--color-primary`).
    fn set_property(&self, name: &str, value: &str);

    /// Set a root attribute (e.g. `lang`, `dir`).
    fn set_attribute(&self, name: &str, value: &str);
}

/// In-memory style target for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStyleTarget {
    properties: Mutex<HashMap<String, String>>,
    attributes: Mutex<HashMap<String, String>>,
}

impl MemoryStyleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.properties.lock().ok()?.get(name).cloned()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().ok()?.get(name).cloned()
    }

    pub fn property_count(&self) -> usize {
        self.properties.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Snapshot of all properties, for idempotence assertions.
    pub fn properties(&self) -> HashMap<String, String> {
        self.properties
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl StyleTarget for MemoryStyleTarget {
    fn set_property(&self, name: &str, value: &str) {
        if let Ok(mut properties) = self.properties.lock() {
            properties.insert(name.to_string(), value.to_string());
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Ok(mut attributes) = self.attributes.lock() {
            attributes.insert(name.to_string(), value.to_string());
        }
    }
}

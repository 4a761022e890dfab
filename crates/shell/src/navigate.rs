//! Navigation seam.
//!
//! The shell decides *where* to go; rendering and URL handling belong to
//! the host surface behind this trait.

use std::sync::Mutex;

/// Host-provided navigation.
pub trait Navigator: Send + Sync {
    /// Path of the page currently shown, such as `/workspace/settings`.
    fn current_path(&self) -> String;

    /// Replace the current page with `path`.
    fn navigate(&self, path: &str);
}

/// In-memory navigator recording history.
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial_path.into()]),
        }
    }

    /// Every path visited, oldest first, including the initial one.
    pub fn history(&self) -> Vec<String> {
        match self.history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        match self.history.lock() {
            Ok(history) => history.last().cloned().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().last().cloned().unwrap_or_default(),
        }
    }

    fn navigate(&self, path: &str) {
        match self.history.lock() {
            Ok(mut history) => history.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_visits_in_order() {
        let navigator = MemoryNavigator::new("/");
        assert_eq!(navigator.current_path(), "/");

        navigator.navigate("/pricing");
        navigator.navigate("/workspace");

        assert_eq!(navigator.current_path(), "/workspace");
        assert_eq!(navigator.history(), vec!["/", "/pricing", "/workspace"]);
    }
}

//! Stored auth session tokens.

use pagerodeo_core::{PreferenceStore, keys};
use serde::{Deserialize, Serialize};

/// The stored (access, refresh) token pair.
///
/// Presence of an access token is what the UI treats as "authenticated".
/// No rotation or silent refresh lives in the shell; a 401 from the
/// backend is the only invalidation signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Load both tokens; `None` unless both are present.
    pub fn load(store: &dyn PreferenceStore) -> Option<Self> {
        Some(Self {
            access: store.get(keys::ACCESS_TOKEN)?,
            refresh: store.get(keys::REFRESH_TOKEN)?,
        })
    }

    /// The stored access token alone. Requests may proceed without one;
    /// absence is not an error.
    pub fn access_token(store: &dyn PreferenceStore) -> Option<String> {
        store.get(keys::ACCESS_TOKEN)
    }

    pub fn save(&self, store: &dyn PreferenceStore) {
        store.set(keys::ACCESS_TOKEN, &self.access);
        store.set(keys::REFRESH_TOKEN, &self.refresh);
    }

    /// Remove both tokens (session invalidation).
    pub fn clear(store: &dyn PreferenceStore) {
        store.remove(keys::ACCESS_TOKEN);
        store.remove(keys::REFRESH_TOKEN);
    }
}

/// Explicit sign-out: drop credentials and the per-session analysis state.
pub fn logout(store: &dyn PreferenceStore) {
    TokenPair::clear(store);
    store.remove(keys::ANALYSIS_STATE);
}

//! Language resolution and the process-wide registry.

use std::sync::{Arc, RwLock};

use pagerodeo_core::{PreferenceStore, StyleTarget, keys};
use pagerodeo_events::{Emitter, ListenerId, Subscription};
use thiserror::Error;

use crate::catalog::{FALLBACK_LANGUAGE, TranslationCatalog};
use crate::direction::TextDirection;

/// Notification emitted after the active language has switched and the
/// document attributes have been rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub lang: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("language code must not be blank")]
    BlankCode,
}

/// Resolve the boot language: stored preference, then the primary subtag
/// of the host-reported locale, then the fallback.
///
/// Deterministic; the store read is the only side effect.
pub fn resolve_initial_language(
    store: &dyn PreferenceStore,
    host_locale: Option<&str>,
) -> String {
    if let Some(stored) = store.get(keys::PREFERRED_LANGUAGE) {
        let stored = stored.trim().to_ascii_lowercase();
        if !stored.is_empty() {
            return stored;
        }
    }

    if let Some(primary) = host_locale.and_then(primary_subtag) {
        return primary;
    }

    FALLBACK_LANGUAGE.to_string()
}

/// First two-letter segment of a locale tag (`en-US` → `en`).
fn primary_subtag(locale: &str) -> Option<String> {
    let segment = locale.trim().split(['-', '_']).next()?;
    if segment.len() == 2 && segment.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(segment.to_ascii_lowercase())
    } else {
        None
    }
}

/// Holds the active language and owns the language-change emitter.
///
/// Invariant: the target's `lang` and `dir` attributes always equal the
/// last resolved language, from construction onward.
pub struct LanguageRegistry {
    catalog: TranslationCatalog,
    store: Arc<dyn PreferenceStore>,
    target: Arc<dyn StyleTarget>,
    active: RwLock<String>,
    emitter: Emitter<LanguageChanged>,
}

impl LanguageRegistry {
    /// Resolve the boot language and stamp `lang`/`dir` immediately, before
    /// any text has rendered, so non-text layout mirroring is correct from
    /// first paint.
    pub fn new(
        catalog: TranslationCatalog,
        store: Arc<dyn PreferenceStore>,
        target: Arc<dyn StyleTarget>,
        host_locale: Option<&str>,
    ) -> Self {
        let initial = resolve_initial_language(store.as_ref(), host_locale);

        let registry = Self {
            catalog,
            store,
            target,
            active: RwLock::new(initial.clone()),
            emitter: Emitter::new(),
        };
        registry.apply_attributes(&initial);
        registry
    }

    pub fn active_language(&self) -> String {
        match self.active.read() {
            Ok(active) => active.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn direction(&self) -> TextDirection {
        TextDirection::for_language(&self.active_language())
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    /// Switch the active catalog, persist the choice, restamp the document
    /// attributes, then notify listeners synchronously. Attribute state is
    /// consistent before any listener runs.
    pub fn change_language(&self, code: &str) -> Result<(), LanguageError> {
        let code = code.trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err(LanguageError::BlankCode);
        }

        match self.active.write() {
            Ok(mut active) => *active = code.clone(),
            Err(poisoned) => *poisoned.into_inner() = code.clone(),
        }

        self.store.set(keys::PREFERRED_LANGUAGE, &code);
        self.apply_attributes(&code);
        tracing::debug!(lang = %code, "active language changed");
        self.emitter.emit(&LanguageChanged { lang: code });

        Ok(())
    }

    /// Adopt the stored preference if it disagrees with the active code
    /// (mount-time reconciliation). Returns true when a switch happened.
    pub fn reconcile(&self) -> bool {
        let Some(stored) = self.store.get(keys::PREFERRED_LANGUAGE) else {
            return false;
        };
        let stored = stored.trim().to_ascii_lowercase();
        if stored.is_empty() || stored == self.active_language() {
            return false;
        }

        self.change_language(&stored).is_ok()
    }

    /// Register for change notifications.
    pub fn on_change(
        &self,
        listener: impl Fn(&LanguageChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.emitter.on(listener)
    }

    pub fn off_change(&self, id: ListenerId) {
        self.emitter.off(id);
    }

    /// Polling subscription to language changes.
    pub fn changes(&self) -> Subscription<LanguageChanged> {
        self.emitter.subscribe()
    }

    /// Translate `key` in the active language.
    pub fn translate(&self, key: &str) -> String {
        self.catalog.translate(key, &self.active_language())
    }

    /// Translate `key` in an explicit language.
    pub fn translate_in(&self, key: &str, lang: &str) -> String {
        self.catalog.translate(key, lang)
    }

    fn apply_attributes(&self, code: &str) {
        self.target.set_attribute("lang", code);
        self.target
            .set_attribute("dir", TextDirection::for_language(code).as_str());
    }
}

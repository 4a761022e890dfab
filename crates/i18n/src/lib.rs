//! `pagerodeo-i18n` — language resolution and translation for the shell.
//!
//! The registry owns the active language, keeps the document-root `lang`
//! and `dir` attributes in sync with it from boot onward, and notifies
//! subscribers synchronously whenever the language changes.

pub mod catalog;
pub mod direction;
pub mod registry;

pub use catalog::{FALLBACK_LANGUAGE, TranslationCatalog};
pub use direction::{RTL_LANGUAGES, TextDirection};
pub use registry::{LanguageChanged, LanguageError, LanguageRegistry, resolve_initial_language};

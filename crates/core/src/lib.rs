//! `pagerodeo-core` — shared seams for the PageRodeo client shell.
//!
//! This crate holds the two injected boundaries the rest of the shell is
//! built against:
//!
//! - [`PreferenceStore`]: synchronous string key/value persistence for
//!   tokens and user preferences.
//! - [`StyleTarget`]: write access to document-root style state (CSS custom
//!   properties and `lang`/`dir` attributes).
//!
//! Both ship with in-memory implementations so the engines above them are
//! testable without a browser or a filesystem.

pub mod store;
pub mod style;

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, keys};
pub use style::{MemoryStyleTarget, StyleTarget};

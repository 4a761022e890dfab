//! `pagerodeo-theme` — palette/typography fetch-and-apply engine.
//!
//! The backend owns the active palette and site typography; this crate
//! fetches both, converts them to CSS custom properties, and keeps the
//! injected [`StyleTarget`](pagerodeo_core::StyleTarget) current across
//! navigations. Snapshots are versionless: the latest fetch wins, guarded
//! against stale completions by a monotonic sequence check.

pub mod config;
pub mod engine;
pub mod source;

pub use config::{PaletteConfig, TypographyConfig};
pub use engine::{FetchState, NAVIGATION_DEBOUNCE, ThemeEngine};
pub use source::{ConfigSource, FixedConfigSource, HttpConfigSource, ThemeError};

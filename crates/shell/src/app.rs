//! Top-level shell composition.

use std::sync::Arc;

use pagerodeo_events::{Emitter, ListenerId, Subscription};
use pagerodeo_i18n::LanguageRegistry;
use pagerodeo_theme::ThemeEngine;

use crate::chrome::{ChromeDecision, chrome_for_path};
use crate::navigate::Navigator;

/// Emitted after the navigator has moved to a new path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChanged {
    pub path: String,
}

/// Wires navigation, theming, and localization together.
///
/// `boot` runs once at startup; `navigate` is the single entry point for
/// route changes so that theme refetch and chrome decisions stay in step.
pub struct AppShell {
    navigator: Arc<dyn Navigator>,
    theme: ThemeEngine,
    i18n: Arc<LanguageRegistry>,
    routes: Emitter<RouteChanged>,
}

impl AppShell {
    pub fn new(
        navigator: Arc<dyn Navigator>,
        theme: ThemeEngine,
        i18n: Arc<LanguageRegistry>,
    ) -> Self {
        Self {
            navigator,
            theme,
            i18n,
            routes: Emitter::new(),
        }
    }

    /// Startup: adopt any stored language preference, then fetch and apply
    /// the initial palette and typography.
    pub async fn boot(&self) {
        self.i18n.reconcile();
        self.theme.refresh().await;
    }

    /// Move to `path`: navigate, schedule the debounced theme refetch,
    /// notify route listeners, and hand back the chrome decision for the
    /// new page.
    pub fn navigate(&self, path: &str) -> ChromeDecision {
        self.navigator.navigate(path);
        self.theme.on_route_change();
        self.routes.emit(&RouteChanged {
            path: path.to_string(),
        });
        chrome_for_path(path)
    }

    /// Chrome decision for the page currently shown.
    pub fn current_chrome(&self) -> ChromeDecision {
        chrome_for_path(&self.navigator.current_path())
    }

    pub fn i18n(&self) -> &Arc<LanguageRegistry> {
        &self.i18n
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.theme
    }

    pub fn on_route_change(
        &self,
        listener: impl Fn(&RouteChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.routes.on(listener)
    }

    pub fn off_route_change(&self, id: ListenerId) {
        self.routes.off(id);
    }

    /// Polling subscription to route changes.
    pub fn route_changes(&self) -> Subscription<RouteChanged> {
        self.routes.subscribe()
    }
}

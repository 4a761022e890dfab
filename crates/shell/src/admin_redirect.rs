//! Redirect shim for the retired `/admin` area.
//!
//! The admin pages moved under `/workspace`. Bookmarks and stale links still
//! land on the old paths, so each one shows a short localized notice and then
//! forwards to its successor.

use std::sync::Arc;
use std::time::Duration;

use pagerodeo_i18n::LanguageRegistry;

use crate::chrome::has_route_prefix;
use crate::navigate::Navigator;

/// Successor for legacy paths without a dedicated entry.
pub const WORKSPACE_ROOT: &str = "/workspace";

/// Old admin path → new workspace path.
const LEGACY_ADMIN_ROUTES: &[(&str, &str)] = &[
    ("/admin/dashboard", "/workspace/admin-overview"),
    ("/admin/users", "/workspace/users"),
    ("/admin/roles", "/workspace/roles"),
    ("/admin/monitors", "/workspace/monitors"),
    ("/admin/settings", "/workspace/settings"),
    ("/admin/reports", "/workspace/reports"),
];

/// How long the moved-notice stays up before the forward happens.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Map a legacy `/admin` path to its successor. Unmapped sub-paths land on
/// the workspace root rather than a dead page.
pub fn map_legacy_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    for (legacy, successor) in LEGACY_ADMIN_ROUTES {
        if has_route_prefix(path, legacy) {
            return (*successor).to_string();
        }
    }

    WORKSPACE_ROOT.to_string()
}

/// Shows a localized moved-notice, waits, then forwards.
pub struct RedirectShim {
    navigator: Arc<dyn Navigator>,
    i18n: Arc<LanguageRegistry>,
    delay: Duration,
}

impl RedirectShim {
    pub fn new(navigator: Arc<dyn Navigator>, i18n: Arc<LanguageRegistry>) -> Self {
        Self {
            navigator,
            i18n,
            delay: REDIRECT_DELAY,
        }
    }

    /// Override the notice delay; tests shorten it, previews may lengthen it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The localized notice text for the host to display while waiting.
    pub fn notice(&self) -> String {
        self.i18n.translate("admin.moved_notice")
    }

    /// Wait out the notice delay, then forward the current legacy path to
    /// its successor.
    pub async fn run(&self) {
        let from = self.navigator.current_path();
        let to = map_legacy_path(&from);

        tokio::time::sleep(self.delay).await;
        tracing::info!(%from, %to, "forwarding retired admin path");
        self.navigator.navigate(&to);
    }
}

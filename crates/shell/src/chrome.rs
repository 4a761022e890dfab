//! Route-scoped chrome decisions.
//!
//! Public pages carry the marketing navigation and footer; authenticated
//! surfaces bring their own sidebar chrome and suppress both.

/// Route prefixes whose pages render without public navigation or footer.
const APP_PREFIXES: &[&str] = &["/dashboard", "/workspace"];

/// Workspace paths that are really public pages and keep the full chrome.
const APP_EXCEPTIONS: &[&str] = &["/workspace/login"];

/// Which global chrome pieces a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeDecision {
    pub show_public_nav: bool,
    pub show_footer: bool,
}

impl ChromeDecision {
    pub const PUBLIC: Self = Self {
        show_public_nav: true,
        show_footer: true,
    };

    pub const WORKSPACE: Self = Self {
        show_public_nav: false,
        show_footer: false,
    };
}

/// Decide chrome for `path`. Pure; re-evaluated on every navigation.
pub fn chrome_for_path(path: &str) -> ChromeDecision {
    let path = normalize(path);

    if APP_EXCEPTIONS.iter().any(|exception| path == *exception) {
        return ChromeDecision::PUBLIC;
    }

    if APP_PREFIXES
        .iter()
        .any(|prefix| has_route_prefix(&path, prefix))
    {
        return ChromeDecision::WORKSPACE;
    }

    ChromeDecision::PUBLIC
}

/// Segment-aware prefix test: `/workspace/x` matches `/workspace`,
/// `/workspaces` does not.
pub(crate) fn has_route_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Strip any query string and a trailing slash (except for the root).
pub(crate) fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/').to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_pages_keep_full_chrome() {
        assert_eq!(chrome_for_path("/"), ChromeDecision::PUBLIC);
        assert_eq!(chrome_for_path("/pricing"), ChromeDecision::PUBLIC);
        assert_eq!(chrome_for_path("/blog/post-1"), ChromeDecision::PUBLIC);
    }

    #[test]
    fn workspace_and_dashboard_suppress_chrome() {
        assert_eq!(chrome_for_path("/workspace"), ChromeDecision::WORKSPACE);
        assert_eq!(
            chrome_for_path("/workspace/billing"),
            ChromeDecision::WORKSPACE
        );
        assert_eq!(chrome_for_path("/dashboard"), ChromeDecision::WORKSPACE);
        assert_eq!(
            chrome_for_path("/dashboard/monitors/42"),
            ChromeDecision::WORKSPACE
        );
    }

    #[test]
    fn workspace_login_is_the_exception() {
        assert_eq!(chrome_for_path("/workspace/login"), ChromeDecision::PUBLIC);
        assert_eq!(
            chrome_for_path("/workspace/login/"),
            ChromeDecision::PUBLIC
        );
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        assert!(has_route_prefix("/workspace", "/workspace"));
        assert!(has_route_prefix("/workspace/users", "/workspace"));
        assert!(!has_route_prefix("/workspaces", "/workspace"));
        assert_eq!(chrome_for_path("/dashboards"), ChromeDecision::PUBLIC);
    }

    #[test]
    fn queries_and_trailing_slashes_are_ignored() {
        assert_eq!(
            chrome_for_path("/workspace/settings?tab=alerts"),
            ChromeDecision::WORKSPACE
        );
        assert_eq!(chrome_for_path("/workspace/"), ChromeDecision::WORKSPACE);
    }
}

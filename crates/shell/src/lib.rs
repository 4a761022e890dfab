//! `pagerodeo-shell` — client-shell composition.
//!
//! Ties the seams together: the API client with its auth-error interceptor,
//! route-scoped chrome decisions, the retired-admin redirect shim, and the
//! [`AppShell`] that keeps navigation, theming, and localization in step.

pub mod admin_redirect;
pub mod app;
pub mod chrome;
pub mod interceptor;
pub mod navigate;
pub mod telemetry;

pub use admin_redirect::{REDIRECT_DELAY, RedirectShim, WORKSPACE_ROOT, map_legacy_path};
pub use app::{AppShell, RouteChanged};
pub use chrome::{ChromeDecision, chrome_for_path};
pub use interceptor::{
    ApiClient, ApiError, ApiMethod, ApiRequest, ApiResponse, ApiTransport, ReqwestTransport,
};
pub use navigate::{MemoryNavigator, Navigator};

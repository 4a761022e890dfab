//! Access decisions as values.
//!
//! The guarded form of a capability check returns [`Access`] instead of
//! throwing: the rendering boundary consumes `Denied` as a first-class
//! forbidden branch. Callers at a `?` boundary can convert with
//! [`Access::into_result`].

use serde::Serialize;
use thiserror::Error;

use crate::session::SessionContext;

/// Outcome of a capability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Access {
    Allowed,
    Denied(DeniedReason),
}

/// Why a check failed, for the forbidden UI and for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedReason {
    /// The permission names that failed the check.
    pub missing: Vec<String>,
}

/// Error form of a denial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("forbidden: missing permission(s) {missing:?}")]
pub struct AccessDenied {
    pub missing: Vec<String>,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed)
    }

    pub fn into_result(self) -> Result<(), AccessDenied> {
        match self {
            Access::Allowed => Ok(()),
            Access::Denied(reason) => Err(AccessDenied {
                missing: reason.missing,
            }),
        }
    }
}

/// Require a single permission.
pub fn require(ctx: &SessionContext, name: &str) -> Access {
    if ctx.has_permission(name) {
        Access::Allowed
    } else {
        Access::Denied(DeniedReason {
            missing: vec![name.to_string()],
        })
    }
}

/// Require every listed permission. An empty list is vacuously allowed.
pub fn require_all(ctx: &SessionContext, names: &[&str]) -> Access {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !ctx.has_permission(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Access::Allowed
    } else {
        Access::Denied(DeniedReason { missing })
    }
}

/// Require at least one listed permission. An empty list is denied.
pub fn require_any(ctx: &SessionContext, names: &[&str]) -> Access {
    if ctx.has_any_permission(names.iter().copied()) {
        Access::Allowed
    } else {
        Access::Denied(DeniedReason {
            missing: names.iter().map(|name| name.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::session::{UserId, UserIdentity};

    use super::*;

    fn ctx() -> SessionContext {
        SessionContext::establish(
            UserIdentity {
                id: UserId::new(),
                is_superuser: false,
            },
            vec!["monitors.read".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn require_reports_the_missing_permission() {
        let access = require(&ctx(), "billing.read");

        let Access::Denied(reason) = access else {
            panic!("expected denial");
        };
        assert_eq!(reason.missing, vec!["billing.read".to_string()]);
    }

    #[test]
    fn require_all_lists_every_missing_name() {
        let access = require_all(&ctx(), &["monitors.read", "billing.read", "users.write"]);

        let Access::Denied(reason) = access else {
            panic!("expected denial");
        };
        assert_eq!(
            reason.missing,
            vec!["billing.read".to_string(), "users.write".to_string()]
        );
    }

    #[test]
    fn require_any_allows_on_partial_grant() {
        assert!(require_any(&ctx(), &["billing.read", "monitors.read"]).is_allowed());
        assert!(!require_any(&ctx(), &[]).is_allowed());
        assert!(require_all(&ctx(), &[]).is_allowed());
    }

    #[test]
    fn into_result_surfaces_an_error_for_question_mark_callers() {
        let err = require(&ctx(), "billing.read").into_result().unwrap_err();
        assert_eq!(err.missing, vec!["billing.read".to_string()]);

        assert!(require(&ctx(), "monitors.read").into_result().is_ok());
    }

    #[test]
    fn anonymous_context_is_denied_not_an_error() {
        let anonymous = SessionContext::anonymous();
        assert!(!require(&anonymous, "monitors.read").is_allowed());
    }
}

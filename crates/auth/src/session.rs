//! Session context: identity plus permission set, validated once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::permissions::PermissionSet;

// ─────────────────────────────────────────────────────────────────────────────
// User Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for the signed-in user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity as seen by the shell.
///
/// Owned by the external authentication subsystem; read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub is_superuser: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Context
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("blank permission name at position {0}")]
    BlankPermission(usize),
}

/// Session-scoped capability context.
///
/// Built once at session establishment and replaced wholesale on re-login.
/// [`SessionContext::anonymous`] is the safe default used before any
/// session exists: every capability query answers "no access" instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<UserIdentity>,
    permissions: PermissionSet,
    established_at: DateTime<Utc>,
}

impl SessionContext {
    /// The no-session default: no identity, empty permission set.
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            permissions: PermissionSet::empty(),
            established_at: Utc::now(),
        }
    }

    /// Validate and build the session context. Permission names are
    /// trimmed; a blank name is rejected rather than silently dropped.
    pub fn establish(
        identity: UserIdentity,
        permission_names: impl IntoIterator<Item = String>,
    ) -> Result<Self, SessionError> {
        let mut names: Vec<String> = Vec::new();
        for (position, name) in permission_names.into_iter().enumerate() {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(SessionError::BlankPermission(position));
            }
            names.push(name);
        }

        Ok(Self {
            identity: Some(identity),
            permissions: PermissionSet::from_names(names),
            established_at: Utc::now(),
        })
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_superuser(&self) -> bool {
        self.identity.as_ref().is_some_and(|user| user.is_superuser)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Capability queries (pure over the identity/permissions pair)
    // ─────────────────────────────────────────────────────────────────────

    /// True unconditionally for superusers, otherwise set membership.
    pub fn has_permission(&self, name: &str) -> bool {
        self.is_superuser() || self.permissions.contains(name)
    }

    /// True iff at least one name is granted. An empty list is `false`.
    pub fn has_any_permission<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        names.into_iter().any(|name| self.has_permission(name))
    }

    /// True iff every name is granted. An empty list is vacuously `true`.
    pub fn has_all_permissions<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        names.into_iter().all(|name| self.has_permission(name))
    }
}

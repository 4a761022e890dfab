//! `pagerodeo-auth` — session context and capability checks for the shell.
//!
//! This crate is intentionally decoupled from HTTP and rendering. The
//! session is validated once at establishment; capability queries are pure
//! functions over the `(identity, permissions)` pair, and denial is a
//! value consumed by the rendering boundary, never an exception.

pub mod guard;
pub mod permissions;
pub mod session;
pub mod tokens;

pub use guard::{Access, AccessDenied, DeniedReason, require, require_all, require_any};
pub use permissions::{Permission, PermissionSet};
pub use session::{SessionContext, SessionError, UserId, UserIdentity};
pub use tokens::{TokenPair, logout};

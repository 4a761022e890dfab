//! `pagerodeo-events` — typed in-process notifications for the client shell.
//!
//! Replaces ambient document-level event dispatch with an explicit emitter
//! so ordering and unsubscription are first-class and testable.

pub mod emitter;
pub mod subscription;

pub use emitter::{Emitter, ListenerId};
pub use subscription::Subscription;

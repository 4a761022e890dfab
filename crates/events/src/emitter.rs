//! Synchronous typed event emitter.
//!
//! Delivery guarantees (relied on by the language registry):
//!
//! - Listeners run synchronously, in registration order, before `emit`
//!   returns, so document state they maintain is consistent before the
//!   caller's next paint.
//! - A listener registered while an emit is in progress sees only
//!   subsequent events.
//! - No retention: an event emitted with no listeners is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use crate::subscription::Subscription;

/// Handle for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Returns false once the sink is dead and should be pruned.
type Sink<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Typed pub/sub emitter with synchronous fan-out.
pub struct Emitter<E> {
    sinks: Mutex<Vec<(ListenerId, Sink<E>)>>,
    next_id: AtomicU64,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener; returns an id for later removal.
    pub fn on(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> ListenerId {
        self.register(Arc::new(move |event: &E| {
            listener(event);
            true
        }))
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn off(&self, id: ListenerId) {
        if let Ok(mut sinks) = self.sinks.lock() {
            sinks.retain(|(sink_id, _)| *sink_id != id);
        }
    }

    /// Deliver `event` to every current listener, in registration order.
    ///
    /// The listener list is snapshotted first, so a listener may register
    /// or remove listeners without deadlocking; such changes take effect
    /// from the next emit.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(ListenerId, Sink<E>)> = match self.sinks.lock() {
            Ok(sinks) => sinks.clone(),
            Err(_) => return,
        };

        let mut dead: Vec<ListenerId> = Vec::new();
        for (id, sink) in &snapshot {
            if !sink(event) {
                dead.push(*id);
            }
        }

        if !dead.is_empty() {
            if let Ok(mut sinks) = self.sinks.lock() {
                sinks.retain(|(id, _)| !dead.contains(id));
            }
            tracing::trace!("pruned {} dead subscription(s)", dead.len());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sinks.lock().map(|sinks| sinks.len()).unwrap_or(0)
    }

    fn register(&self, sink: Sink<E>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut sinks) = self.sinks.lock() {
            sinks.push((id, sink));
        }
        id
    }
}

impl<E: Clone + Send + 'static> Emitter<E> {
    /// Channel-backed subscription for consumers that poll instead of
    /// registering callbacks. Dropped subscriptions are pruned on the next
    /// emit.
    pub fn subscribe(&self) -> Subscription<E> {
        let (tx, rx) = mpsc::channel();
        self.register(Arc::new(move |event: &E| tx.send(event.clone()).is_ok()));
        Subscription::new(rx)
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

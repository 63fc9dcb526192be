//! Synchronous fan-out of events to subscribers.
//!
//! Handlers run inline on the receiver task, in registration order, one
//! event at a time. They must return quickly: a slow handler delays the next
//! read and can push the connection past its receive timeout. Consumers that
//! need to do real work should hand the event off to their own task, for
//! example with [`EventDispatcher::forward_to`].
//!
//! A panicking handler is logged and skipped; the remaining handlers still
//! run and the receive loop carries on.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::warn;

use crate::protocol::{
    ClientEvent, ClosedEvent, NamesEvent, PrivateMessageEvent, TopicEvent, UnhandledEvent,
};

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Subscribers<E> {
    handlers: RwLock<Vec<Handler<E>>>,
}

impl<E> Subscribers<E> {
    fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    fn push(&self, handler: Handler<E>) {
        self.handlers.write().push(handler);
    }

    fn len(&self) -> usize {
        self.handlers.read().len()
    }

    fn notify(&self, event: &E) {
        // Snapshot so a handler may subscribe without deadlocking.
        let handlers: Vec<Handler<E>> = self.handlers.read().clone();
        for (index, handler) in handlers.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                warn!(
                    handler = index,
                    event = std::any::type_name::<E>(),
                    "event handler panicked"
                );
            }
        }
    }
}

/// Per-kind subscriber lists.
pub struct EventDispatcher {
    topic: Subscribers<TopicEvent>,
    names: Subscribers<NamesEvent>,
    message: Subscribers<PrivateMessageEvent>,
    unhandled: Subscribers<UnhandledEvent>,
    closed: Subscribers<ClosedEvent>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            topic: Subscribers::new(),
            names: Subscribers::new(),
            message: Subscribers::new(),
            unhandled: Subscribers::new(),
            closed: Subscribers::new(),
        }
    }

    pub fn on_topic(&self, handler: impl Fn(&TopicEvent) + Send + Sync + 'static) {
        self.topic.push(Arc::new(handler));
    }

    pub fn on_names(&self, handler: impl Fn(&NamesEvent) + Send + Sync + 'static) {
        self.names.push(Arc::new(handler));
    }

    pub fn on_message(&self, handler: impl Fn(&PrivateMessageEvent) + Send + Sync + 'static) {
        self.message.push(Arc::new(handler));
    }

    pub fn on_unhandled(&self, handler: impl Fn(&UnhandledEvent) + Send + Sync + 'static) {
        self.unhandled.push(Arc::new(handler));
    }

    pub fn on_closed(&self, handler: impl Fn(&ClosedEvent) + Send + Sync + 'static) {
        self.closed.push(Arc::new(handler));
    }

    /// Subscribe to every kind, forwarding clones of each event into `tx`.
    ///
    /// Send errors (receiver dropped) are ignored.
    pub fn forward_to(&self, tx: mpsc::UnboundedSender<ClientEvent>) {
        let t = tx.clone();
        self.on_topic(move |e| {
            let _ = t.send(ClientEvent::Topic(e.clone()));
        });
        let t = tx.clone();
        self.on_names(move |e| {
            let _ = t.send(ClientEvent::Names(e.clone()));
        });
        let t = tx.clone();
        self.on_message(move |e| {
            let _ = t.send(ClientEvent::Message(e.clone()));
        });
        let t = tx.clone();
        self.on_unhandled(move |e| {
            let _ = t.send(ClientEvent::Unhandled(e.clone()));
        });
        self.on_closed(move |e| {
            let _ = tx.send(ClientEvent::Closed(e.clone()));
        });
    }

    /// Invoke every subscriber of the event's kind, in registration order.
    pub fn dispatch(&self, event: &ClientEvent) {
        match event {
            ClientEvent::Topic(e) => self.topic.notify(e),
            ClientEvent::Names(e) => self.names.notify(e),
            ClientEvent::Message(e) => self.message.notify(e),
            ClientEvent::Unhandled(e) => self.unhandled.notify(e),
            ClientEvent::Closed(e) => self.closed.notify(e),
        }
    }

    /// Total number of registered handlers across all kinds.
    pub fn handler_count(&self) -> usize {
        self.topic.len()
            + self.names.len()
            + self.message.len()
            + self.unhandled.len()
            + self.closed.len()
    }
}

//! Live-notification fan-out service.
//!
//! A process-scoped [`Notifier`] is built once at startup and shared via
//! [`crate::state::AppState`]; handlers publish through it and SSE
//! clients subscribe to it. No global singleton.
//!
//! ## Delivery Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  notify(msg)                                                    │
//! │      │                                                          │
//! │      ├──► listener 1: buffer has room      → delivered          │
//! │      ├──► listener 2: buffer full          → DROPPED (silent)   │
//! │      └──► listener 3: receiver gone        → pruned             │
//! │                                                                 │
//! │  Best-effort on purpose: the producer (a sale being rung up)    │
//! │  never blocks on a slow SSE consumer. Fine for "new sale"       │
//! │  pings, wrong for anything needing reliable delivery.           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listeners registered after `notify` returns never see that message -
//! there is no backlog or replay.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;
use tracing::debug;

/// Fan-out hub over the currently-connected live listeners.
///
/// The listener map is the only shared mutable state in the core; one
/// mutex guards every add/remove/notify. The set is small and the
/// critical sections are try_sends, so a single lock is enough.
pub struct Notifier {
    /// Per-listener channel capacity. Beyond it, messages are dropped
    /// for that listener.
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: u64,
    listeners: HashMap<u64, mpsc::Sender<String>>,
}

impl Notifier {
    /// Creates a notifier whose listeners each buffer up to `capacity`
    /// undelivered messages.
    pub fn new(capacity: usize) -> Self {
        Notifier {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner {
                next_id: 0,
                listeners: HashMap::new(),
            }),
        }
    }

    /// Registers a listener and returns its subscription.
    ///
    /// Dropping the subscription unregisters the listener.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let (tx, rx) = mpsc::channel(self.capacity);

        let id = {
            let mut inner = self.inner.lock().expect("notifier lock poisoned");
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, tx);
            id
        };

        debug!(listener = id, "Notification listener registered");

        Subscription {
            id,
            rx,
            notifier: Arc::clone(self),
        }
    }

    /// Delivers `message` to every currently-registered listener on a
    /// non-blocking best-effort basis.
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        let mut inner = self.inner.lock().expect("notifier lock poisoned");

        let mut gone = Vec::new();
        for (id, tx) in &inner.listeners {
            match tx.try_send(message.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(listener = id, "Listener buffer full, dropping message");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    gone.push(*id);
                }
            }
        }

        for id in gone {
            inner.listeners.remove(&id);
        }
    }

    /// Number of currently-registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().expect("notifier lock poisoned").listeners.len()
    }

    fn unsubscribe(&self, id: u64) {
        let mut inner = self.inner.lock().expect("notifier lock poisoned");
        inner.listeners.remove(&id);
        debug!(listener = id, "Notification listener removed");
    }
}

/// One registered listener. Yields messages as a [`Stream`]; dropping it
/// removes the listener from the hub.
pub struct Subscription {
    id: u64,
    rx: mpsc::Receiver<String>,
    notifier: Arc<Notifier>,
}

impl Subscription {
    /// Receives the next message, or `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

impl Stream for Subscription {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[tokio::test]
    async fn test_registered_listener_receives_message() {
        let notifier = Arc::new(Notifier::new(16));
        let mut sub = notifier.subscribe();

        notifier.notify("sale!");
        assert_eq!(sub.recv().await.as_deref(), Some("sale!"));
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_no_backlog() {
        let notifier = Arc::new(Notifier::new(16));
        notifier.notify("before anyone listened");

        let mut sub = notifier.subscribe();
        // Nothing pending for the late subscriber
        assert!(sub.recv().now_or_never().is_none());

        notifier.notify("after");
        assert_eq!(sub.recv().await.as_deref(), Some("after"));
    }

    #[tokio::test]
    async fn test_full_buffer_drops_silently() {
        let notifier = Arc::new(Notifier::new(1));
        let mut sub = notifier.subscribe();

        notifier.notify("first");
        notifier.notify("second"); // buffer full, dropped for this listener

        assert_eq!(sub.recv().await.as_deref(), Some("first"));
        assert!(sub.recv().now_or_never().is_none());

        // The drop is per-listener and per-message; delivery resumes
        notifier.notify("third");
        assert_eq!(sub.recv().await.as_deref(), Some("third"));
    }

    #[tokio::test]
    async fn test_drop_unregisters_listener() {
        let notifier = Arc::new(Notifier::new(16));
        assert_eq!(notifier.listener_count(), 0);

        let sub = notifier.subscribe();
        let sub2 = notifier.subscribe();
        assert_eq!(notifier.listener_count(), 2);

        drop(sub);
        assert_eq!(notifier.listener_count(), 1);
        drop(sub2);
        assert_eq!(notifier.listener_count(), 0);

        // Notifying with no listeners is a no-op, not an error
        notifier.notify("into the void");
    }

    #[tokio::test]
    async fn test_fan_out_reaches_all_listeners() {
        let notifier = Arc::new(Notifier::new(4));
        let mut subs: Vec<_> = (0..3).map(|_| notifier.subscribe()).collect();

        notifier.notify("broadcast");

        for sub in &mut subs {
            assert_eq!(sub.recv().await.as_deref(), Some("broadcast"));
        }
    }
}

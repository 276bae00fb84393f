use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

/// Identifies one subscription on a [`Signal`] for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberKey(u64);

type Handler<T> = Rc<dyn Fn(&T)>;

struct SignalInner<T> {
    subscribers: Vec<(SubscriberKey, Handler<T>)>,
    next_key: u64,
    closed: bool,
}

/// Single-threaded multicast channel.
///
/// Handlers run synchronously on [`publish`](Signal::publish), in
/// subscription order. Delivery is re-entrancy safe: a handler may
/// subscribe, unsubscribe (itself included), publish, or close the same
/// signal. The subscriber list is snapshotted when a publish begins, so
/// handlers added during delivery first see the next publish, and each
/// snapshotted handler is re-checked for liveness right before its call so
/// removed handlers are skipped.
///
/// A panicking handler is caught and logged; remaining handlers still run.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                subscribers: Vec::new(),
                next_key: 0,
                closed: false,
            })),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Signal")
            .field("subscribers", &inner.subscribers.len())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning its removal key.
    ///
    /// On a closed signal the handler is discarded and the returned key is
    /// inert.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> SubscriberKey {
        let mut inner = self.inner.borrow_mut();
        let key = SubscriberKey(inner.next_key);
        inner.next_key += 1;

        if inner.closed {
            tracing::warn!("Subscribe on a closed signal; handler discarded");
            return key;
        }

        inner.subscribers.push((key, Rc::new(handler)));
        key
    }

    /// Remove a subscription. Returns whether it was still registered.
    ///
    /// Safe to call from inside the removed handler itself.
    pub fn unsubscribe(&self, key: SubscriberKey) -> bool {
        // Removed handler drops after the borrow is released, in case its
        // captures re-enter this signal on drop.
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner
                .subscribers
                .iter()
                .position(|(k, _)| *k == key)
                .map(|idx| inner.subscribers.remove(idx))
        };
        removed.is_some()
    }

    /// Deliver `payload` to every live subscriber in subscription order.
    pub fn publish(&self, payload: &T) {
        let snapshot: Vec<(SubscriberKey, Handler<T>)> = {
            let inner = self.inner.borrow();
            if inner.closed {
                return;
            }
            inner.subscribers.clone()
        };

        for (key, handler) in snapshot {
            // A previous handler may have closed the signal or removed this
            // subscription.
            {
                let inner = self.inner.borrow();
                if inner.closed {
                    break;
                }
                if !inner.subscribers.iter().any(|(k, _)| *k == key) {
                    continue;
                }
            }

            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                tracing::error!(
                    key = key.0,
                    panic = panic_text(panic.as_ref()),
                    "Signal handler panicked"
                );
            }
        }
    }

    /// Permanently shut the signal down: drop all subscribers, ignore
    /// future subscribes, make future publishes no-ops.
    pub fn close(&self) {
        let dropped = {
            let mut inner = self.inner.borrow_mut();
            inner.closed = true;
            std::mem::take(&mut inner.subscribers)
        };
        drop(dropped);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "opaque panic payload"
    }
}

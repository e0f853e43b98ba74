//! Page-level visibility broadcast.
//!
//! The document has one visibility signal but many carousel instances. Rather
//! than ambient global listeners, the host owns a [`VisibilityHub`]: it is
//! created when the first instance mounts, each instance registers a callback
//! on construction and deregisters on teardown, and the hub is dropped with
//! the last instance.
//!
//! Delivery is isolated: a subscriber that panics is caught and logged, and
//! the remaining subscribers still receive the broadcast — no instance can
//! block delivery to its siblings.

use std::panic::{self, AssertUnwindSafe};

/// Stable token for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(bool)>;

/// Broadcast registry for document visibility changes.
#[derive(Default)]
pub struct VisibilityHub {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl VisibilityHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; the returned token deregisters it.
    pub fn subscribe(&mut self, callback: impl FnMut(bool) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Deliver a visibility change to every live subscriber. Returns the
    /// number of subscribers whose callback panicked (each one is logged and
    /// skipped; delivery continues).
    pub fn broadcast(&mut self, visible: bool) -> usize {
        let mut failures = 0;
        for (id, callback) in &mut self.subscribers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(visible)));
            if outcome.is_err() {
                failures += 1;
                log::error!("visibility subscriber {id:?} panicked; continuing delivery");
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for VisibilityHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityHub")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub = VisibilityHub::new();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |visible| seen.borrow_mut().push((tag, visible)));
        }

        let failures = hub.broadcast(false);
        assert_eq!(failures, 0);
        assert_eq!(&*seen.borrow(), &[("a", false), ("b", false)]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_receiving() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut hub = VisibilityHub::new();
        let id = {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |_| *seen.borrow_mut() += 1)
        };
        hub.broadcast(true);
        assert!(hub.unsubscribe(id));
        hub.broadcast(true);
        assert_eq!(*seen.borrow(), 1);
        assert!(hub.is_empty());
        // Double-unsubscribe reports the absence.
        assert!(!hub.unsubscribe(id));
    }

    #[test]
    fn a_panicking_subscriber_does_not_block_the_rest() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut hub = VisibilityHub::new();
        hub.subscribe(|_| panic!("misbehaving instance"));
        {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |_| *seen.borrow_mut() += 1);
        }

        let failures = hub.broadcast(true);
        assert_eq!(failures, 1);
        assert_eq!(*seen.borrow(), 1);
    }
}

//! Listener lifecycles
//!
//! Hosts expose pointer, viewport and frame events as [`EventSource`]s.
//! Subscribing returns a [`Subscription`] guard; dropping the guard (or
//! calling [`Subscription::unsubscribe`]) removes the listener, so a
//! component that owns its subscriptions releases them on every exit path,
//! including an unmount in the middle of a transition.
//!
//! ```ignore
//! let pointer = EventSource::<PointerEvent>::new();
//! let sub = pointer.subscribe(|e| println!("{:?}", e.position));
//! pointer.emit(&PointerEvent::moved(Point::new(4.0, 2.0)));
//! drop(sub); // listener removed
//! ```
//!
//! Everything here is single-threaded (`Rc`), matching the frame-driven host.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

type Listener<E> = Rc<dyn Fn(&E)>;
type Registry<E> = RefCell<SlotMap<ListenerId, Listener<E>>>;

/// A single-threaded event source with explicit subscribe/unsubscribe
pub struct EventSource<E: 'static> {
    listeners: Rc<Registry<E>>,
}

impl<E: 'static> EventSource<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Register a listener. It stays registered while the returned guard lives.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        let id = self.listeners.borrow_mut().insert(Rc::new(listener));
        let registry: Weak<Registry<E>> = Rc::downgrade(&self.listeners);
        tracing::trace!(?id, "listener subscribed");

        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(id);
                    tracing::trace!(?id, "listener released");
                }
            })),
        }
    }

    /// Deliver an event to every listener, returning how many were invoked
    ///
    /// Listeners may subscribe or unsubscribe while the event is being
    /// delivered; a listener removed mid-dispatch is not invoked afterwards.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<(ListenerId, Listener<E>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (id, Rc::clone(listener)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains_key(id) {
                continue;
            }
            listener(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<E: 'static> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Clone for EventSource<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E: 'static> fmt::Debug for EventSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a registered listener; releases it on drop
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// A subscription that holds nothing (used by disabled components)
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Shared liveness flag checked by every deferred callback
///
/// Components clone the flag into their callbacks and kill it on disposal.
/// A callback that fires afterwards sees a dead flag and returns without
/// touching state.
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn kill(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

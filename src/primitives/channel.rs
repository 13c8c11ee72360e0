// ============================================================================
// selectable-list - Channel Primitive
// A replay-latest value cell with a synchronous subscriber list
// ============================================================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::core::types::{never_equals, EqualsFn};

// =============================================================================
// TYPE-ERASED CHANNEL
// =============================================================================
//
// A Subscription has to find its way back to the channel it came from
// without knowing the channel's value type. Unsubscribing only needs the
// subscriber id, so the guard holds a Weak<dyn AnyChannel>.
// =============================================================================

/// Type-erased channel interface used by [`Subscription`].
pub trait AnyChannel: Any {
    /// Diagnostic label given at construction.
    fn label(&self) -> &str;

    /// Number of values published since construction.
    fn version(&self) -> u64;

    /// Number of live subscribers.
    fn subscriber_count(&self) -> usize;

    /// Whether the given subscriber is still registered.
    fn has_subscriber(&self, id: u64) -> bool;

    /// Remove a subscriber. Returns false if it was already gone.
    fn remove_subscriber(&self, id: u64) -> bool;

    /// Upcast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

// =============================================================================
// CHANNEL INNER
// =============================================================================

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
    /// Cleared on removal, so an in-flight delivery round can skip it
    live: Rc<Cell<bool>>,
}

/// The shared state behind a [`Channel`].
pub struct ChannelInner<T> {
    label: String,

    /// Latest published value
    value: RefCell<T>,

    /// Incremented on every publish that got past the equality check
    version: Cell<u64>,

    next_id: Cell<u64>,

    /// Callbacks in subscription order
    subscribers: RefCell<Vec<Subscriber<T>>>,

    /// Subscriptions this channel holds on its upstreams (derived channels)
    upstream: RefCell<Vec<Subscription>>,

    equals: EqualsFn<T>,
}

impl<T: 'static> ChannelInner<T> {
    fn new(label: String, value: T, equals: EqualsFn<T>) -> Self {
        Self {
            label,
            value: RefCell::new(value),
            version: Cell::new(0),
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
            upstream: RefCell::new(Vec::new()),
            equals,
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    fn add_subscriber(&self, callback: Callback<T>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            callback,
            live: Rc::new(Cell::new(true)),
        });
        id
    }

    /// Store `value` and notify, unless the equality function says nothing
    /// changed.
    pub(crate) fn publish(&self, value: T) -> bool
    where
        T: Clone,
    {
        let changed = {
            let current = self.value.borrow();
            !(self.equals)(&current, &value)
        };
        if changed {
            *self.value.borrow_mut() = value;
            self.notify();
        }
        changed
    }

    /// Bump the version and deliver the current value to every subscriber.
    ///
    /// Delivery works from snapshots of both the value and the subscriber
    /// list, so callbacks may read, write, subscribe or unsubscribe on this
    /// channel without hitting a RefCell borrow conflict. A subscriber removed
    /// by an earlier callback in the same round is skipped.
    ///
    /// A publish from inside a callback runs its own round to completion
    /// before the outer round resumes. Subscribers later in the outer round
    /// therefore see the newer value first and the older snapshot last.
    fn notify(&self)
    where
        T: Clone,
    {
        let version = self.version.get() + 1;
        self.version.set(version);

        let snapshot = self.value.borrow().clone();
        let targets: Vec<(Rc<Cell<bool>>, Callback<T>)> = self
            .subscribers
            .borrow()
            .iter()
            .map(|s| (s.live.clone(), s.callback.clone()))
            .collect();

        trace!(
            channel = %self.label,
            version,
            subscribers = targets.len(),
            "publish"
        );

        for (live, callback) in targets {
            if live.get() {
                callback(&snapshot);
            }
        }
    }
}

impl<T: 'static> AnyChannel for ChannelInner<T> {
    fn label(&self) -> &str {
        &self.label
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn has_subscriber(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|s| s.id == id)
    }

    fn remove_subscriber(&self, id: u64) -> bool {
        let removed = {
            let mut subscribers = self.subscribers.borrow_mut();
            let index = subscribers.iter().position(|s| s.id == id);
            index.map(|index| subscribers.remove(index))
        };
        // Dropped outside the borrow: the callback may own Subscriptions.
        match removed {
            Some(subscriber) => {
                subscriber.live.set(false);
                true
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// CHANNEL<T> - The public channel handle
// =============================================================================

/// A replay-latest observable value.
///
/// A channel always holds a value. Subscribing delivers that value
/// immediately, then every value published afterwards, synchronously and in
/// subscription order. Cloning a channel yields another handle to the same
/// state.
///
/// Callbacks may publish to the channel they are subscribed to. The nested
/// publish is delivered in full before the outer one finishes, so a
/// subscriber registered after the publishing one receives the newer value
/// before the older one. Read [`get`](Self::get) for the settled value.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use selectable_list::Channel;
///
/// let count = Channel::new(0);
/// count.publish(1);
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let _sub = count.subscribe(move |v| sink.borrow_mut().push(*v));
///
/// count.publish(2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct Channel<T> {
    inner: Rc<ChannelInner<T>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Channel<T> {
    /// Create a channel that notifies on every publish.
    pub fn new(value: T) -> Self {
        Self::from_parts(String::new(), value, never_equals)
    }

    /// Create a labeled channel that notifies on every publish.
    ///
    /// The label only shows up in trace output and `Debug`.
    pub fn named(label: impl Into<String>, value: T) -> Self {
        Self::from_parts(label.into(), value, never_equals)
    }

    /// Create a channel that skips publishes the equality function judges
    /// unchanged.
    ///
    /// ```
    /// use selectable_list::{default_equals, Channel};
    ///
    /// let ch = Channel::with_equals(5, default_equals);
    /// assert!(!ch.publish(5));
    /// assert!(ch.publish(6));
    /// assert_eq!(ch.version(), 1);
    /// ```
    pub fn with_equals(value: T, equals: EqualsFn<T>) -> Self {
        Self::from_parts(String::new(), value, equals)
    }

    pub(crate) fn from_parts(label: String, value: T, equals: EqualsFn<T>) -> Self {
        Self {
            inner: Rc::new(ChannelInner::new(label, value, equals)),
        }
    }

    /// Get the current value (cloning).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Access the current value with a closure (avoids cloning).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Publish a new value.
    ///
    /// Returns true if subscribers were notified.
    pub fn publish(&self, value: T) -> bool
    where
        T: Clone,
    {
        self.inner.publish(value)
    }

    /// Mutate the value in place, then notify. Always counts as a change.
    ///
    /// The value is mutably borrowed while `f` runs; `f` must not read this
    /// channel.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        f(&mut self.inner.value.borrow_mut());
        self.inner.notify();
    }

    /// Subscribe to this channel.
    ///
    /// `f` runs right away with the current value, then once per publish.
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription
    where
        T: Clone,
    {
        let callback: Callback<T> = Rc::new(f);
        let id = self.inner.add_subscriber(callback.clone());
        let current = self.get();
        callback(&current);
        self.subscription(id)
    }

    /// Subscribe to future publishes only, without the initial replay.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe_changes(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.add_subscriber(Rc::new(f));
        self.subscription(id)
    }

    fn subscription(&self, id: u64) -> Subscription {
        let any: Rc<dyn AnyChannel> = self.inner.clone();
        Subscription {
            channel: Rc::downgrade(&any),
            id: Some(id),
        }
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Number of values published since construction.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }

    /// Keep an upstream subscription alive for as long as this channel lives.
    pub(crate) fn hold(&self, subscription: Subscription) {
        self.inner.upstream.borrow_mut().push(subscription);
    }

    pub(crate) fn downgrade(&self) -> Weak<ChannelInner<T>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Rc<ChannelInner<T>>) -> Self {
        Self { inner }
    }

    /// Get the inner state as a type-erased AnyChannel.
    pub fn as_any_channel(&self) -> Rc<dyn AnyChannel> {
        self.inner.clone()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("label", &self.inner.label)
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// RAII guard for a channel subscriber.
///
/// Dropping the guard removes the callback. If the channel is gone first the
/// guard is inert.
pub struct Subscription {
    channel: Weak<dyn AnyChannel>,
    id: Option<u64>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Leave the callback registered for the rest of the channel's life.
    pub fn detach(mut self) {
        self.id = None;
    }

    /// Whether the callback is still registered on a live channel.
    pub fn is_active(&self) -> bool {
        match (self.id, self.channel.upgrade()) {
            (Some(id), Some(channel)) => channel.has_subscriber(id),
            _ => false,
        }
    }

    fn release(&mut self) {
        if let (Some(id), Some(channel)) = (self.id.take(), self.channel.upgrade()) {
            channel.remove_subscriber(id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

// ============================================================================
// selectable-list - Derived Channels
// Channels recomputed from the latest values of one or more upstreams
// ============================================================================
//
// Unlike the lazy Derived of a pull-based signal graph, these are eager: an
// upstream publish recomputes and republishes downstream before it returns.
//
// Ownership runs one way only. The downstream channel holds the upstream
// Subscriptions; the upstream callbacks hold only Weak references, both to
// the downstream and to sibling upstreams. Dropping the downstream drops the
// subscriptions, and no Rc cycle forms between siblings.
// ============================================================================

use std::rc::{Rc, Weak};

use super::channel::{Channel, ChannelInner};

impl<T: Clone + 'static> Channel<T> {
    /// Derive a channel whose value is `f` applied to this channel's latest
    /// value.
    ///
    /// ```
    /// use selectable_list::Channel;
    ///
    /// let items = Channel::new(vec![1, 2, 3]);
    /// let count = items.map(|v| v.len());
    /// assert_eq!(count.get(), 3);
    ///
    /// items.publish(vec![]);
    /// assert_eq!(count.get(), 0);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Channel<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let label = format!("{}.map", self.label());
        let out = Channel::named(label, self.with(&f));
        let target = out.downgrade();
        out.hold(self.subscribe_changes(move |value| {
            if let Some(target) = target.upgrade() {
                target.publish(f(value));
            }
        }));
        out
    }
}

/// Combine three channels into one derived channel.
///
/// The result starts at `f(a, b, c)` of the current values and is
/// recomputed from the latest value of all three whenever any of them
/// publishes. It has no state of its own beyond that cached result.
///
/// ```
/// use selectable_list::{combine3, Channel};
///
/// let a = Channel::new(1);
/// let b = Channel::new(2);
/// let c = Channel::new(3);
/// let sum = combine3("sum", &a, &b, &c, |a, b, c| a + b + c);
/// assert_eq!(sum.get(), 6);
///
/// b.publish(10);
/// assert_eq!(sum.get(), 14);
/// ```
pub fn combine3<A, B, C, R, F>(
    label: impl Into<String>,
    a: &Channel<A>,
    b: &Channel<B>,
    c: &Channel<C>,
    f: F,
) -> Channel<R>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    R: Clone + 'static,
    F: Fn(&A, &B, &C) -> R + 'static,
{
    let initial = a.with(|a| b.with(|b| c.with(|c| f(a, b, c))));
    let out = Channel::named(label, initial);

    let sources = Rc::new(Sources {
        a: a.downgrade(),
        b: b.downgrade(),
        c: c.downgrade(),
        out: out.downgrade(),
        f,
    });

    let s = sources.clone();
    out.hold(a.subscribe_changes(move |_| s.recompute()));
    let s = sources.clone();
    out.hold(b.subscribe_changes(move |_| s.recompute()));
    let s = sources;
    out.hold(c.subscribe_changes(move |_| s.recompute()));

    out
}

struct Sources<A, B, C, R, F> {
    a: Weak<ChannelInner<A>>,
    b: Weak<ChannelInner<B>>,
    c: Weak<ChannelInner<C>>,
    out: Weak<ChannelInner<R>>,
    f: F,
}

impl<A, B, C, R, F> Sources<A, B, C, R, F>
where
    A: 'static,
    B: 'static,
    C: 'static,
    R: Clone + 'static,
    F: Fn(&A, &B, &C) -> R,
{
    fn recompute(&self) {
        let (Some(a), Some(b), Some(c), Some(out)) = (
            self.a.upgrade(),
            self.b.upgrade(),
            self.c.upgrade(),
            self.out.upgrade(),
        ) else {
            return;
        };
        let next = a.with(|a| b.with(|b| c.with(|c| (self.f)(a, b, c))));
        Channel::from_inner(out).publish(next);
    }
}

// =============================================================================
// TESTS
// =============================================================================

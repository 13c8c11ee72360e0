// ============================================================================
// selectable-list - Ergonomic Macros
// ============================================================================

/// Clone handles into a move closure.
///
/// Subscriber callbacks are `'static`, so anything they touch has to be
/// cloned in first. This saves the `let x = x.clone();` block.
///
/// # Usage
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use selectable_list::{cloned, SelectableList};
///
/// let genres: SelectableList<u32> = SelectableList::new("genres");
/// let count = Rc::new(Cell::new(0));
///
/// let _sub = genres
///     .list()
///     .subscribe(cloned!(count => move |list| count.set(list.len())));
///
/// genres.add_items([28, 12]);
/// assert_eq!(count.get(), 2);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Build a `Vec` of subscriptions that all stay alive together.
///
/// # Usage
///
/// ```rust
/// use selectable_list::{subscriptions, Channel};
///
/// let a = Channel::new(1);
/// let b = Channel::new(2);
/// let subs = subscriptions![
///     a.subscribe(|_| {}),
///     b.subscribe(|_| {}),
/// ];
/// assert_eq!(subs.len(), 2);
/// assert_eq!(a.subscriber_count(), 1);
/// drop(subs);
/// assert_eq!(a.subscriber_count(), 0);
/// ```
#[macro_export]
macro_rules! subscriptions {
    ($($sub:expr),* $(,)?) => {
        {
            let subs: ::std::vec::Vec<$crate::Subscription> = ::std::vec![$($sub),*];
            subs
        }
    };
}

// ============================================================================
// selectable-list - SelectableList
// Items, selection and load status published as replay-latest channels
// ============================================================================

use std::error::Error as StdError;

use tracing::{debug, warn};

use crate::collections::KeyedItems;
use crate::core::status::{Status, StatusError};
use crate::core::types::Identifiable;
use crate::primitives::channel::Channel;
use crate::primitives::combined::combine3;

// =============================================================================
// VIEW MODEL
// =============================================================================

/// Combined snapshot of a [`SelectableList`].
///
/// Recomputed from the list, selection and status channels every time one of
/// them publishes. Mutating a `ViewModel` does not feed back into the list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>"
    ))
)]
pub struct ViewModel<T: Identifiable> {
    pub list: KeyedItems<T>,
    pub selected: KeyedItems<T>,
    pub status: Status,
}

impl<T: Identifiable> Default for ViewModel<T> {
    fn default() -> Self {
        Self {
            list: KeyedItems::new(),
            selected: KeyedItems::new(),
            status: Status::Idle,
        }
    }
}

// =============================================================================
// SELECTABLE LIST
// =============================================================================

/// A named list of items with a selected subset and a load status.
///
/// All state lives in four channels. `list`, `selected` and `status` each
/// publish on every mutation that touches them; `view_model` republishes
/// whenever any of the three does. Every channel replays its latest value
/// to new subscribers.
///
/// The name is a diagnostic label only. It shows up in trace output and in
/// the channel labels, never in behavior.
///
/// Selection does not have to be a subset of the list: selecting an item
/// that was never added is accepted and stored as given.
///
/// # Example
///
/// ```
/// use selectable_list::SelectableList;
///
/// let genres: SelectableList<u32> = SelectableList::new("genres");
/// genres.set_loading(true);
/// genres.add_items([28, 12, 16]);
/// genres.select_items([12]);
///
/// let vm = genres.snapshot();
/// assert_eq!(vm.list.len(), 3);
/// assert_eq!(vm.selected.to_vec(), vec![12]);
/// assert!(vm.status.is_success());
/// ```
pub struct SelectableList<T: Identifiable> {
    name: String,
    list: Channel<KeyedItems<T>>,
    selected: Channel<KeyedItems<T>>,
    status: Channel<Status>,
    view_model: Channel<ViewModel<T>>,
}

impl<T> SelectableList<T>
where
    T: Identifiable + Clone + 'static,
{
    /// Create an empty list with `Idle` status.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let list = Channel::named(format!("{name}.list"), KeyedItems::new());
        let selected = Channel::named(format!("{name}.selected"), KeyedItems::new());
        let status = Channel::named(format!("{name}.status"), Status::Idle);
        let view_model = combine3(
            format!("{name}.view_model"),
            &list,
            &selected,
            &status,
            |list: &KeyedItems<T>, selected: &KeyedItems<T>, status: &Status| ViewModel {
                list: list.clone(),
                selected: selected.clone(),
                status: status.clone(),
            },
        );

        debug!(list = %name, "created");

        Self {
            name,
            list,
            selected,
            status,
            view_model,
        }
    }

    // =========================================================================
    // ITEMS
    // =========================================================================

    /// Merge `items` into the list. Same as `add_items_with(items, false)`.
    pub fn add_items<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.add_items_with(items, false);
    }

    /// Add items to the list, then set the status to `Success`.
    ///
    /// With `clear_existing` the list becomes exactly the deduplicated
    /// `items`. Otherwise items with a new id are appended in order and
    /// items with a known id are ignored.
    ///
    /// The status write happens even when nothing was added.
    pub fn add_items_with<I>(&self, items: I, clear_existing: bool)
    where
        I: IntoIterator<Item = T>,
    {
        // Drain first: a lazy iterator may read this channel.
        let items: Vec<T> = items.into_iter().collect();
        let mut added = 0;
        self.list.update(|list| {
            if clear_existing {
                list.clear();
            }
            added = list.merge(items);
        });

        debug!(
            list = %self.name,
            added,
            total = self.list.with(KeyedItems::len),
            clear_existing,
            "add_items"
        );

        self.status.publish(Status::Success);
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Merge `items` into the selection. Same as
    /// `select_items_with(items, false)`.
    pub fn select_items<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.select_items_with(items, false);
    }

    /// Add items to the selection, with the same clear/merge rules as
    /// [`add_items_with`](Self::add_items_with). Status is left alone.
    pub fn select_items_with<I>(&self, items: I, clear_existing: bool)
    where
        I: IntoIterator<Item = T>,
    {
        // Drain first: a lazy iterator may read this channel.
        let items: Vec<T> = items.into_iter().collect();
        let mut added = 0;
        self.selected.update(|selected| {
            if clear_existing {
                selected.clear();
            }
            added = selected.merge(items);
        });

        debug!(
            list = %self.name,
            added,
            selected = self.selected.with(KeyedItems::len),
            clear_existing,
            "select_items"
        );
    }

    /// Select list items by id.
    ///
    /// Each id is looked up in the current list; hits are merged into the
    /// selection in the order given. Ids not in the list are skipped.
    pub fn select_items_by_id<I>(&self, ids: I)
    where
        I: IntoIterator<Item = T::Id>,
    {
        let ids: Vec<T::Id> = ids.into_iter().collect();
        let mut skipped = 0usize;
        let found: Vec<T> = self.list.with(|list| {
            ids.into_iter()
                .filter_map(|id| {
                    let hit = list.get(&id).cloned();
                    if hit.is_none() {
                        skipped += 1;
                    }
                    hit
                })
                .collect()
        });

        let mut added = 0;
        self.selected.update(|selected| added = selected.merge(found));

        debug!(
            list = %self.name,
            added,
            skipped,
            selected = self.selected.with(KeyedItems::len),
            "select_items_by_id"
        );
    }

    /// Select every list item. Same as `select_all_with(true)`.
    pub fn select_all(&self) {
        self.select_all_with(true);
    }

    /// Replace the selection with the whole list (`true`) or nothing
    /// (`false`).
    pub fn select_all_with(&self, select: bool) {
        let next = if select {
            self.list.get()
        } else {
            KeyedItems::new()
        };
        let selected = next.len();
        self.selected.publish(next);

        debug!(list = %self.name, select, selected, "select_all");
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    /// `true` sets `Pending`, `false` sets `Idle`, whatever came before.
    pub fn set_loading(&self, loading: bool) {
        let status = if loading { Status::Pending } else { Status::Idle };
        debug!(list = %self.name, %status, "set_loading");
        self.status.publish(status);
    }

    /// Overwrite the status.
    pub fn update_status(&self, status: Status) {
        debug!(list = %self.name, %status, "update_status");
        self.status.publish(status);
    }

    /// Drive the status around a synchronous load.
    ///
    /// Sets `Pending`, runs `loader`, then either adds the loaded items
    /// (which sets `Success`) or records the failure as an `Error` status
    /// carrying the error's message and source chain. The loader's error is
    /// handed back to the caller unchanged.
    ///
    /// ```
    /// use selectable_list::SelectableList;
    ///
    /// let genres: SelectableList<u32> = SelectableList::new("genres");
    ///
    /// let res = genres.track_load_status(false, || Ok::<_, std::io::Error>(vec![28, 12]));
    /// assert!(res.is_ok());
    /// assert!(genres.status().get().is_success());
    ///
    /// let res = genres.track_load_status(false, || {
    ///     Err::<Vec<u32>, _>(std::io::Error::other("offline"))
    /// });
    /// assert!(res.is_err());
    /// assert_eq!(genres.status().get().error_payload().unwrap().message, "offline");
    /// assert_eq!(genres.list().get().len(), 2);
    /// ```
    pub fn track_load_status<I, E, F>(&self, clear_existing: bool, loader: F) -> Result<(), E>
    where
        I: IntoIterator<Item = T>,
        E: StdError + 'static,
        F: FnOnce() -> Result<I, E>,
    {
        self.set_loading(true);
        match loader() {
            Ok(items) => {
                self.add_items_with(items, clear_existing);
                Ok(())
            }
            Err(err) => {
                warn!(list = %self.name, error = %err, "load failed");
                self.update_status(Status::from_error(StatusError::from_error(&err)));
                Err(err)
            }
        }
    }

    // =========================================================================
    // CHANNELS
    // =========================================================================

    /// Diagnostic label given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest list state.
    pub fn list(&self) -> &Channel<KeyedItems<T>> {
        &self.list
    }

    /// Latest selection state.
    pub fn selected(&self) -> &Channel<KeyedItems<T>> {
        &self.selected
    }

    /// Latest load status.
    pub fn status(&self) -> &Channel<Status> {
        &self.status
    }

    /// Latest combined view-model.
    pub fn view_model(&self) -> &Channel<ViewModel<T>> {
        &self.view_model
    }

    /// Current view-model, without subscribing.
    pub fn snapshot(&self) -> ViewModel<T> {
        self.view_model.get()
    }
}

impl<T: Identifiable + std::fmt::Debug + 'static> std::fmt::Debug for SelectableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.view_model.with(|vm| {
            f.debug_struct("SelectableList")
                .field("name", &self.name)
                .field("list", &vm.list)
                .field("selected", &vm.selected)
                .field("status", &vm.status)
                .finish()
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

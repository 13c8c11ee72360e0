// ============================================================================
// selectable-list - KeyedItems
// An insertion-ordered item sequence, unique by id
// ============================================================================

use indexmap::IndexMap;
use indexmap::map::{IntoValues, Values};

use crate::core::types::Identifiable;

// =============================================================================
// KEYED ITEMS
// =============================================================================

/// An ordered sequence of items with no two entries sharing an id.
///
/// Insertion order is preserved. When an id shows up again, the entry already
/// present wins and keeps its position.
///
/// # Example
///
/// ```
/// use selectable_list::KeyedItems;
///
/// let mut items: KeyedItems<u32> = [3, 1, 3, 2].into_iter().collect();
/// assert_eq!(items.to_vec(), vec![3, 1, 2]);
///
/// let added = items.merge([2, 5]);
/// assert_eq!(added, 1);
/// assert_eq!(items.to_vec(), vec![3, 1, 2, 5]);
/// ```
pub struct KeyedItems<T: Identifiable> {
    entries: IndexMap<T::Id, T>,
}

impl<T: Identifiable> KeyedItems<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create an empty sequence with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over items in order.
    pub fn iter(&self) -> Values<'_, T::Id, T> {
        self.entries.values()
    }

    /// Iterate over ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &T::Id> + '_ {
        self.entries.keys()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entries.get(id)
    }

    /// Item at a position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get_index(index).map(|(_, item)| item)
    }

    /// Position of an id in insertion order.
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.entries.get_index_of(id)
    }

    pub fn contains_id(&self, id: &T::Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Append items whose id is not present yet, in the order given.
    ///
    /// Items with a known id are dropped; the existing entry is kept as is.
    /// Returns how many items were appended.
    pub fn merge<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.entries.len();
        for item in items {
            self.entries.entry(item.id()).or_insert(item);
        }
        self.entries.len() - before
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True if both sequences hold the same ids in the same order, whatever
    /// the items' other fields say.
    pub fn same_ids(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ids().eq(other.ids())
    }

    /// Clone the items out into a Vec, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.values().cloned().collect()
    }

    /// Consume into a Vec, in order.
    pub fn into_vec(self) -> Vec<T> {
        self.entries.into_values().collect()
    }
}

impl<T: Identifiable> Default for KeyedItems<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable + Clone> Clone for KeyedItems<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Order-sensitive: same items in a different order are not equal.
impl<T: Identifiable + PartialEq> PartialEq for KeyedItems<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Identifiable + Eq> Eq for KeyedItems<T> {}

impl<T: Identifiable + std::fmt::Debug> std::fmt::Debug for KeyedItems<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Collect with first-occurrence-wins dedup.
impl<T: Identifiable> FromIterator<T> for KeyedItems<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items = Self::new();
        items.merge(iter);
        items
    }
}

impl<T: Identifiable> Extend<T> for KeyedItems<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl<T: Identifiable> From<Vec<T>> for KeyedItems<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Identifiable> IntoIterator for KeyedItems<T> {
    type Item = T;
    type IntoIter = IntoValues<T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a KeyedItems<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

// =============================================================================
// SERDE (sequence of items; ids are recomputed on the way back in)
// =============================================================================

#[cfg(feature = "serde")]
impl<T> serde::Serialize for KeyedItems<T>
where
    T: Identifiable + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for KeyedItems<T>
where
    T: Identifiable + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

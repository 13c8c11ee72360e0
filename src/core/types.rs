// ============================================================================
// selectable-list - Type Definitions
// Item identity and the equality functions used by channels
// ============================================================================

use std::fmt::Debug;
use std::hash::Hash;

// =============================================================================
// IDENTITY
// =============================================================================
//
// The container never looks inside an item except for its id. Everything
// else about T is opaque: dedup, merge and lookup-by-id all go through
// `Identifiable::id`.
// =============================================================================

/// An item that can live in a selectable list.
///
/// Two items with the same id are the same entry as far as the list is
/// concerned, whatever their other fields hold.
///
/// # Example
///
/// ```
/// use selectable_list::Identifiable;
///
/// #[derive(Clone)]
/// struct Genre {
///     id: String,
///     name: String,
/// }
///
/// impl Identifiable for Genre {
///     type Id = String;
///
///     fn id(&self) -> String {
///         self.id.clone()
///     }
/// }
/// ```
pub trait Identifiable {
    /// Id type. Strings and integers are the common choices.
    type Id: Eq + Hash + Clone + Debug;

    /// Return this item's id.
    fn id(&self) -> Self::Id;
}

// Plain ids are their own identity, which keeps tests and quick
// prototypes free of wrapper structs.
macro_rules! self_identifying {
    ($($t:ty),* $(,)?) => {
        $(
            impl Identifiable for $t {
                type Id = $t;

                fn id(&self) -> $t {
                    self.clone()
                }
            }
        )*
    };
}

self_identifying!(String, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Identifiable for &'static str {
    type Id = &'static str;

    fn id(&self) -> &'static str {
        self
    }
}

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function type for deciding whether a write is a change.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default equality using PartialEq
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Never equal: every write counts as a change.
///
/// This is the channel default, so every mutation reaches subscribers even
/// when the new value matches the old one.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

// =============================================================================
// TESTS
// =============================================================================

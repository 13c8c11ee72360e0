// ============================================================================
// selectable-list - Reactive Selectable-List State
// ============================================================================
//
// A named list of identifiable items, a selected subset and a load status,
// each published on a replay-latest channel, plus a combined view-model
// channel. Single-threaded and synchronous: every mutation has reached every
// subscriber by the time it returns.
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;
pub mod primitives;
pub mod selectable;

// Re-export core items at crate root for ergonomic access
pub use crate::core::status::{Status, StatusError};
pub use crate::core::types::{default_equals, never_equals, EqualsFn, Identifiable};

// Re-export primitives
pub use primitives::channel::{AnyChannel, Channel, Subscription};
pub use primitives::combined::combine3;

// Re-export collections
pub use collections::KeyedItems;

pub use selectable::{SelectableList, ViewModel};

// =============================================================================
// TESTS
// =============================================================================

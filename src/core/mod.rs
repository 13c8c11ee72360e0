// ============================================================================
// selectable-list - Core Module
// Item identity, load status and equality functions
// ============================================================================

pub mod status;
pub mod types;

// Re-export commonly used items
pub use status::{Status, StatusError};
pub use types::{default_equals, never_equals, EqualsFn, Identifiable};

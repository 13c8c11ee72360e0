// ============================================================================
// selectable-list - Collections
// Id-keyed, insertion-ordered item storage
// ============================================================================
//
// ListState and SelectedState are both KeyedItems: an IndexMap from id to
// item, so dedup, ordered iteration and lookup-by-id share one structure.
// ============================================================================

mod keyed;

pub use keyed::KeyedItems;

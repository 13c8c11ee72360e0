// ============================================================================
// selectable-list - Primitives Module
// Replay-latest channels, subscriptions and derived channels
// ============================================================================

pub mod channel;
pub mod combined;

// Re-export for convenience
pub use channel::{AnyChannel, Channel, ChannelInner, Subscription};
pub use combined::combine3;

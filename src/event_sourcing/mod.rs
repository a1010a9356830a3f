// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic building blocks: entities are opaque to everything here.
// Tagged operations live in `aggregate` and `event`; the typed API is
// re-exported at this level.
//
// ============================================================================

mod core;

pub use self::core::*;

// ============================================================================
// Event Sourcing Core - Events, Aggregates, Processors
// ============================================================================
//
// Layering:
// - tagged:    closed sum over aggregate / event / untyped values
// - event:     immutable domain facts
// - aggregate: consistency boundary with a pending-event queue
// - processor: capability that consumes emitted batches
//
// ============================================================================

pub mod aggregate;
pub mod clock;
pub mod dispatch;
pub mod event;
pub mod processor;
pub mod tagged;

pub use aggregate::{Aggregate, Contains, MAPPED_ENTITY_SHAPE, SINGLE_ENTITY_SHAPE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatch::DispatchConfig;
pub use event::{deserialize_event, serialize_event, Event};
pub use processor::{EventProcessor, LoggingProcessor};
pub use tagged::{Tagged, AGGREGATE_TAG, EVENT_TAG};

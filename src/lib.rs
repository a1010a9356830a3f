//! Domain-modeling toolkit: tagged results, domain events, and aggregates
//! that queue events and flush them to registered processors.
//!
//! ```
//! use aggregate_kit::event_sourcing::{aggregate, Aggregate, Event, Tagged};
//! use serde_json::json;
//!
//! let cart: Tagged<String> = Aggregate::new("cart", "A".to_string(), Vec::new()).into();
//! let cart = aggregate::update_entity(&cart, "B".to_string()).unwrap();
//! let cart = aggregate::add_event(&cart, Event::new("sku_changed", json!({"sku": "B"}))).unwrap();
//! let cart = aggregate::emit_events(&cart).unwrap();
//! assert_eq!(aggregate::unwrap(&cart).unwrap().pending_count(), 0);
//! ```

pub mod common;
pub mod event_sourcing;
pub mod metrics;

pub use common::{DomainError, DomainResult, ErrorKind, ErrorPayload};
pub use event_sourcing::{
    Aggregate, Clock, Contains, DispatchConfig, Event, EventProcessor, LoggingProcessor, Tagged,
};

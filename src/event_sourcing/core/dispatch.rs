use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::event::Event;
use super::processor::EventProcessor;

// ============================================================================
// Event Dispatch
// ============================================================================
//
// Sequential fan-out: every processor gets the whole batch, one call at a
// time, in registration order. Outcomes are never inspected.
//
// ============================================================================

#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Catch a panicking processor and carry on with the next one
    pub isolate_panics: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::isolating()
    }
}

impl DispatchConfig {
    /// A processor panic is logged and dispatch continues
    pub fn isolating() -> Self {
        Self { isolate_panics: true }
    }

    /// A processor panic unwinds through the caller
    pub fn strict() -> Self {
        Self { isolate_panics: false }
    }
}

/// Hand `events` to every processor. Returns how many processors panicked.
pub(crate) fn dispatch(
    processors: &[Arc<dyn EventProcessor>],
    events: &[Event],
    config: &DispatchConfig,
) -> usize {
    let mut panicked = 0;

    for processor in processors {
        tracing::debug!(
            processor = processor.name(),
            batch_size = events.len(),
            "Dispatching events"
        );

        if !config.isolate_panics {
            processor.process(events);
            continue;
        }

        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| processor.process(events))) {
            panicked += 1;
            tracing::error!(
                processor = processor.name(),
                batch_size = events.len(),
                panic = panic_message(payload.as_ref()),
                "Event processor panicked, continuing dispatch"
            );
        }
    }

    panicked
}

/// Text carried by a panic, when it is a string
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

use tracing::Level;

use super::event::Event;

// ============================================================================
// Event Processor Capability
// ============================================================================
//
// Processors are registered on an aggregate at construction and receive the
// full pending batch on every emission. They report nothing back; retries,
// persistence and error handling are the processor's own business.
//
// ============================================================================

pub trait EventProcessor: Send + Sync {
    /// Consume one batch of events, oldest first
    fn process(&self, events: &[Event]);

    /// Label used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> EventProcessor for F
where
    F: Fn(&[Event]) + Send + Sync,
{
    fn process(&self, events: &[Event]) {
        self(events)
    }
}

/// Writes one tracing record per event
#[derive(Debug, Clone)]
pub struct LoggingProcessor {
    level: Level,
}

impl LoggingProcessor {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingProcessor {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl EventProcessor for LoggingProcessor {
    fn process(&self, events: &[Event]) {
        for event in events {
            let id = event.id();
            let kind = event.name();
            let timestamp = event.timestamp();
            match self.level {
                Level::ERROR => tracing::error!(%id, event = kind, %timestamp, "Domain event"),
                Level::WARN => tracing::warn!(%id, event = kind, %timestamp, "Domain event"),
                Level::INFO => tracing::info!(%id, event = kind, %timestamp, "Domain event"),
                Level::DEBUG => tracing::debug!(%id, event = kind, %timestamp, "Domain event"),
                _ => tracing::trace!(%id, event = kind, %timestamp, "Domain event"),
            }
        }
    }

    fn name(&self) -> &str {
        "logging"
    }
}

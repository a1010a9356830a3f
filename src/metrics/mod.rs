use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::event_sourcing::{Event, EventProcessor};

// ============================================================================
// Metrics Module - Prometheus metrics for emitted events
// ============================================================================
//
// Provides:
// - Events processed, by event name
// - Batches delivered and their size distribution
//
// Register a `MetricsProcessor` on an aggregate to record its emissions.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub events_processed: IntCounterVec,
    pub event_batches: IntCounter,
    pub event_batch_size: Histogram,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let events_processed = IntCounterVec::new(
            Opts::new("events_processed_total", "Total domain events delivered to processors"),
            &["event"],
        )?;
        registry.register(Box::new(events_processed.clone()))?;

        let event_batches = IntCounter::new(
            "event_batches_total",
            "Total event batches emitted",
        )?;
        registry.register(Box::new(event_batches.clone()))?;

        let event_batch_size = Histogram::with_opts(
            HistogramOpts::new("event_batch_size", "Number of events per emitted batch")
                .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        )?;
        registry.register(Box::new(event_batch_size.clone()))?;

        Ok(Self {
            registry,
            events_processed,
            event_batches,
            event_batch_size,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_batch(&self, events: &[Event]) {
        self.event_batches.inc();
        self.event_batch_size.observe(events.len() as f64);
        for event in events {
            self.events_processed.with_label_values(&[event.name()]).inc();
        }
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather_text(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Processor that records every batch it receives
pub struct MetricsProcessor {
    metrics: std::sync::Arc<Metrics>,
}

impl MetricsProcessor {
    pub fn new(metrics: std::sync::Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

impl EventProcessor for MetricsProcessor {
    fn process(&self, events: &[Event]) {
        self.metrics.record_batch(events);
    }

    fn name(&self) -> &str {
        "metrics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_sourcing::Aggregate;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.event_batches.get(), 0);
    }

    #[test]
    fn test_record_batch_counts_by_name() {
        let metrics = Metrics::new().unwrap();

        metrics.record_batch(&[
            Event::new("item_added", json!({})),
            Event::new("item_added", json!({})),
            Event::new("item_removed", json!({})),
        ]);

        assert_eq!(metrics.event_batches.get(), 1);
        assert_eq!(metrics.events_processed.with_label_values(&["item_added"]).get(), 2);
        assert_eq!(metrics.events_processed.with_label_values(&["item_removed"]).get(), 1);
        assert_eq!(metrics.event_batch_size.get_sample_count(), 1);
    }

    #[test]
    fn test_metrics_processor_on_aggregate() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let processor = Arc::new(MetricsProcessor::new(metrics.clone()));

        Aggregate::new("cart", "A".to_string(), vec![processor])
            .add_event(Event::new("item_added", json!({"sku": "A"})))
            .emit_events();

        assert_eq!(metrics.event_batches.get(), 1);
        assert_eq!(metrics.events_processed.with_label_values(&["item_added"]).get(), 1);
    }

    #[test]
    fn test_gather_text() {
        let metrics = Metrics::new().unwrap();
        metrics.record_batch(&[Event::new("item_added", json!({}))]);

        let text = metrics.gather_text().unwrap();
        assert!(text.contains("event_batches_total 1"));
        assert!(text.contains("events_processed_total{event=\"item_added\"} 1"));
    }
}

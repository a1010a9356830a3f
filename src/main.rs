use std::sync::Arc;

use aggregate_kit::event_sourcing::{
    aggregate, Aggregate, Event, EventProcessor, LoggingProcessor, Tagged,
};
use aggregate_kit::metrics::{Metrics, MetricsProcessor};
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Default to INFO level, override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,aggregate_kit=debug"))
        )
        .init();

    tracing::info!("Starting aggregate demo");

    let metrics = Arc::new(Metrics::new()?);
    let processors: Vec<Arc<dyn EventProcessor>> = vec![
        Arc::new(LoggingProcessor::default()),
        Arc::new(MetricsProcessor::new(metrics.clone())),
    ];

    let cart: Tagged<serde_json::Value> =
        Aggregate::new("cart", json!({"sku": "A"}), processors).into();

    let cart = aggregate::update_entity(&cart, json!({"sku": "B"}))?;
    let sku_changed = Event::new("sku_changed", json!({"from": "A", "to": "B"}));
    let cart = aggregate::add_event(&cart, sku_changed)?;
    let cart = aggregate::add_event(&cart, Event::new("quantity_set", json!({"quantity": 3})))?;

    let entity = aggregate::entity(&cart)?;
    tracing::info!(?entity, "Cart updated");

    let cart = aggregate::emit_events(&cart)?;
    let pending = aggregate::unwrap(&cart)?.pending_count();
    tracing::info!(pending, "Cart flushed");

    println!("{}", metrics.gather_text()?);

    Ok(())
}

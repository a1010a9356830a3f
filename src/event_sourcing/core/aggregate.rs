use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::common::{
    ensure_arity, extract_element, has_tag, DomainError, DomainResult, NOT_AGGREGATE_TYPE,
    STRUCTURE_INDEX, TAGGED_ARITY, UNKNOWN_DATA_TYPE,
};
use super::dispatch::{dispatch, DispatchConfig};
use super::event::Event;
use super::processor::EventProcessor;
use super::tagged::{Tagged, AGGREGATE_TAG};

// ============================================================================
// Aggregate - Consistency Boundary
// ============================================================================
//
// An aggregate wraps one entity or a keyed collection of entities, a queue of
// events not yet delivered, and the processors that receive them.
//
// Values are never mutated: every transition borrows the current aggregate
// and returns a new one.
//
//   Created(events=[]) --add_event--> Pending(events=[e1..en])
//   Pending            --emit_events--> Created(events=[])
//   update_entity loops on either state without touching the queue.
//
// ============================================================================

pub const SINGLE_ENTITY_SHAPE: &str = "aggregate holds a single entity";
pub const MAPPED_ENTITY_SHAPE: &str = "aggregate holds mapped entities";

/// Entity payload: fixed shape for the lifetime of an aggregate
#[derive(Debug, Clone, PartialEq)]
pub enum Contains<E> {
    Single(E),
    Mapped(BTreeMap<String, E>),
}

impl<E> Contains<E> {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Contains::Mapped(_))
    }

    pub fn as_single(&self) -> Option<&E> {
        match self {
            Contains::Single(entity) => Some(entity),
            Contains::Mapped(_) => None,
        }
    }

    pub fn as_mapped(&self) -> Option<&BTreeMap<String, E>> {
        match self {
            Contains::Single(_) => None,
            Contains::Mapped(entities) => Some(entities),
        }
    }
}

pub struct Aggregate<E> {
    name: String,
    contains: Contains<E>,
    events: Vec<Event>,
    processors: Vec<Arc<dyn EventProcessor>>,
}

impl<E> Aggregate<E> {
    /// Aggregate around a single entity
    pub fn new(
        name: impl Into<String>,
        entity: E,
        processors: Vec<Arc<dyn EventProcessor>>,
    ) -> Self {
        Self::from_contains(name, Contains::Single(entity), processors)
    }

    /// Aggregate around a keyed collection of entities
    pub fn with_entities<K>(
        name: impl Into<String>,
        entities: impl IntoIterator<Item = (K, E)>,
        processors: Vec<Arc<dyn EventProcessor>>,
    ) -> Self
    where
        K: Into<String>,
    {
        let entities = entities.into_iter().map(|(key, entity)| (key.into(), entity)).collect();
        Self::from_contains(name, Contains::Mapped(entities), processors)
    }

    fn from_contains(
        name: impl Into<String>,
        contains: Contains<E>,
        processors: Vec<Arc<dyn EventProcessor>>,
    ) -> Self {
        let name = name.into();
        tracing::debug!(
            aggregate = %name,
            mapped = contains.is_mapped(),
            processors = processors.len(),
            "Aggregate created"
        );
        Self {
            name,
            contains,
            events: Vec::new(),
            processors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self) -> &Contains<E> {
        &self.contains
    }

    /// Keyed entities; fails on a single-entity aggregate
    pub fn entities(&self) -> DomainResult<&BTreeMap<String, E>> {
        self.contains
            .as_mapped()
            .ok_or_else(|| DomainError::aggregate(SINGLE_ENTITY_SHAPE))
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }

    pub fn processors(&self) -> &[Arc<dyn EventProcessor>] {
        &self.processors
    }
}

impl<E: Clone> Aggregate<E> {
    fn with_contains(&self, contains: Contains<E>) -> Self {
        Self {
            name: self.name.clone(),
            contains,
            events: self.events.clone(),
            processors: self.processors.clone(),
        }
    }

    /// Replace the single entity
    pub fn update_entity(&self, entity: E) -> DomainResult<Self> {
        match self.contains {
            Contains::Single(_) => {
                tracing::debug!(aggregate = %self.name, "Entity replaced");
                Ok(self.with_contains(Contains::Single(entity)))
            }
            Contains::Mapped(_) => Err(DomainError::aggregate(MAPPED_ENTITY_SHAPE)),
        }
    }

    /// Insert or overwrite one keyed entity
    pub fn update_entity_at(&self, key: impl Into<String>, entity: E) -> DomainResult<Self> {
        let mut entities = self.entities()?.clone();
        let key = key.into();
        tracing::debug!(aggregate = %self.name, key = %key, "Keyed entity replaced");
        entities.insert(key, entity);
        Ok(self.with_contains(Contains::Mapped(entities)))
    }

    /// Replace the whole keyed collection
    pub fn replace_entities(&self, entities: BTreeMap<String, E>) -> DomainResult<Self> {
        self.entities()?;
        Ok(self.with_contains(Contains::Mapped(entities)))
    }

    /// Queue an event behind the ones already pending
    pub fn add_event(&self, event: Event) -> Self {
        tracing::debug!(
            aggregate = %self.name,
            event = event.name(),
            pending = self.events.len() + 1,
            "Event queued"
        );
        let mut next = self.clone();
        next.events.push(event);
        next
    }

    /// Deliver the pending batch to every processor and clear the queue
    pub fn emit_events(&self) -> Self {
        self.emit_events_with(&DispatchConfig::default())
    }

    pub fn emit_events_with(&self, config: &DispatchConfig) -> Self {
        let panicked = dispatch(&self.processors, &self.events, config);

        tracing::info!(
            aggregate = %self.name,
            events = self.events.len(),
            processors = self.processors.len(),
            panicked,
            "Events emitted"
        );

        Self {
            name: self.name.clone(),
            contains: self.contains.clone(),
            events: Vec::new(),
            processors: self.processors.clone(),
        }
    }
}

impl<E: Clone> Clone for Aggregate<E> {
    fn clone(&self) -> Self {
        self.with_contains(self.contains.clone())
    }
}

impl<E: fmt::Debug> fmt::Debug for Aggregate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let processors: Vec<&str> = self.processors.iter().map(|p| p.name()).collect();
        f.debug_struct("Aggregate")
            .field("name", &self.name)
            .field("contains", &self.contains)
            .field("events", &self.events)
            .field("processors", &processors)
            .finish()
    }
}

/// Processors compare by identity
impl<E: PartialEq> PartialEq for Aggregate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.contains == other.contains
            && self.events == other.events
            && self.processors.len() == other.processors.len()
            && self
                .processors
                .iter()
                .zip(&other.processors)
                .all(|(a, b)| Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ())
    }
}

// ============================================================================
// Tagged Operations
// ============================================================================

pub fn is_aggregate<E>(value: &Tagged<E>) -> bool {
    match value {
        Tagged::Aggregate(_) => true,
        Tagged::Other(Value::Array(items)) => has_tag(items, AGGREGATE_TAG),
        _ => false,
    }
}

/// Validate the tag and borrow the aggregate structure
pub fn unwrap<E>(value: &Tagged<E>) -> DomainResult<&Aggregate<E>> {
    match value {
        Tagged::Aggregate(aggregate) => Ok(aggregate),
        Tagged::Event(_) => Err(DomainError::aggregate(NOT_AGGREGATE_TYPE)),
        Tagged::Other(Value::Array(items)) => {
            if has_tag(items, AGGREGATE_TAG) {
                // Arity faults surface as-is; an untyped structure is never promoted.
                extract_element(items, STRUCTURE_INDEX)?;
                ensure_arity(items, TAGGED_ARITY)?;
            }
            Err(DomainError::aggregate(NOT_AGGREGATE_TYPE))
        }
        Tagged::Other(_) => Err(DomainError::aggregate(UNKNOWN_DATA_TYPE)),
    }
}

pub fn entity<E>(value: &Tagged<E>) -> DomainResult<&Contains<E>> {
    unwrap(value).map(Aggregate::contains)
}

pub fn entities<E>(value: &Tagged<E>) -> DomainResult<&BTreeMap<String, E>> {
    unwrap(value)?.entities()
}

pub fn update_entity<E: Clone>(value: &Tagged<E>, entity: E) -> DomainResult<Tagged<E>> {
    unwrap(value)?.update_entity(entity).map(Tagged::Aggregate)
}

pub fn update_entity_at<E: Clone>(
    value: &Tagged<E>,
    key: impl Into<String>,
    entity: E,
) -> DomainResult<Tagged<E>> {
    unwrap(value)?.update_entity_at(key, entity).map(Tagged::Aggregate)
}

pub fn add_event<E: Clone>(value: &Tagged<E>, event: Event) -> DomainResult<Tagged<E>> {
    Ok(Tagged::Aggregate(unwrap(value)?.add_event(event)))
}

pub fn emit_events<E: Clone>(value: &Tagged<E>) -> DomainResult<Tagged<E>> {
    Ok(Tagged::Aggregate(unwrap(value)?.emit_events()))
}

pub fn emit_events_with<E: Clone>(
    value: &Tagged<E>,
    config: &DispatchConfig,
) -> DomainResult<Tagged<E>> {
    Ok(Tagged::Aggregate(unwrap(value)?.emit_events_with(config)))
}

// ============================================================================
// Tests
// ============================================================================

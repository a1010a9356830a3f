use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{
    ensure_arity, extract_element, has_tag, DomainError, DomainResult, ErrorKind,
    INVALID_EVENT_TYPE, STRUCTURE_INDEX, TAGGED_ARITY,
};
use super::clock::{Clock, SystemClock};
use super::tagged::{Tagged, EVENT_TAG};

// ============================================================================
// Domain Event - An immutable fact
// ============================================================================
//
// Created once, never mutated. Events are cloned into an aggregate's pending
// queue and handed to processors by reference on emission.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    id: Uuid,
    name: String,
    payload: Value,
    timestamp: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with the current wall-clock time
    pub fn new(name: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self::new_at(name, payload, &SystemClock)
    }

    /// Create an event stamped by the given clock
    pub fn new_at(name: impl Into<String>, payload: impl Into<Value>, clock: &dyn Clock) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            payload: payload.into(),
            timestamp: clock.now(),
        }
    }

    /// Create an event from any serializable payload
    pub fn from_data<T: Serialize>(name: impl Into<String>, data: &T) -> DomainResult<Self> {
        let payload = serde_json::to_value(data).map_err(|e| {
            DomainError::internal(format!("failed to serialize event payload: {}", e))
        })?;
        Ok(Self::new(name, payload))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Decode the payload into a typed value
    pub fn decode_payload<T: DeserializeOwned>(&self) -> DomainResult<T> {
        T::deserialize(&self.payload).map_err(|e| {
            DomainError::structured(
                ErrorKind::Event,
                json!({ "event": self.name, "reason": e.to_string() }),
            )
        })
    }
}

// ============================================================================
// Tagged Inspection
// ============================================================================

pub fn is_event<E>(value: &Tagged<E>) -> bool {
    match value {
        Tagged::Event(_) => true,
        Tagged::Other(Value::Array(items)) => has_tag(items, EVENT_TAG),
        _ => false,
    }
}

/// The whole event structure
pub fn structure<E>(value: &Tagged<E>) -> DomainResult<&Event> {
    match value {
        Tagged::Event(event) => Ok(event),
        Tagged::Other(Value::Array(items)) if has_tag(items, EVENT_TAG) => {
            // Arity faults surface as-is; an untyped structure is never promoted.
            extract_element(items, STRUCTURE_INDEX)?;
            ensure_arity(items, TAGGED_ARITY)?;
            Err(DomainError::event(INVALID_EVENT_TYPE))
        }
        _ => Err(DomainError::event(INVALID_EVENT_TYPE)),
    }
}

pub fn payload<E>(value: &Tagged<E>) -> DomainResult<&Value> {
    structure(value).map(Event::payload)
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event(event: &Event) -> DomainResult<String> {
    serde_json::to_string(event)
        .map_err(|e| DomainError::internal(format!("failed to serialize event: {}", e)))
}

pub fn deserialize_event(json: &str) -> DomainResult<Event> {
    serde_json::from_str(json).map_err(|e| {
        DomainError::structured(ErrorKind::Event, json!({ "reason": e.to_string() }))
    })
}

// ============================================================================
// Tests
// ============================================================================

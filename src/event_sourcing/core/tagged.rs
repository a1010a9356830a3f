use serde_json::Value;

use super::aggregate::Aggregate;
use super::event::Event;

// ============================================================================
// Tagged Values
// ============================================================================
//
// Closed sum over the shapes the toolkit understands. Typed aggregates and
// events are matched directly; `Other` holds untyped data. A JSON array in
// `Other` is a raw tuple (element 0 is the tag), anything else is not a
// tuple at all.
//
// ============================================================================

pub const AGGREGATE_TAG: &str = "aggregate";
pub const EVENT_TAG: &str = "event";

#[derive(Debug, Clone, PartialEq)]
pub enum Tagged<E> {
    Aggregate(Aggregate<E>),
    Event(Event),
    Other(Value),
}

impl<E> Tagged<E> {
    /// The symbolic tag, if the value is tuple-shaped and tagged with a string
    pub fn tag(&self) -> Option<&str> {
        match self {
            Tagged::Aggregate(_) => Some(AGGREGATE_TAG),
            Tagged::Event(_) => Some(EVENT_TAG),
            Tagged::Other(Value::Array(items)) => items.first().and_then(Value::as_str),
            Tagged::Other(_) => None,
        }
    }

    /// Raw tuple elements, if this is an untyped array
    pub fn as_raw_tuple(&self) -> Option<&[Value]> {
        match self {
            Tagged::Other(Value::Array(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_tuple(&self) -> bool {
        match self {
            Tagged::Aggregate(_) | Tagged::Event(_) => true,
            Tagged::Other(value) => value.is_array(),
        }
    }

    pub fn into_aggregate(self) -> Option<Aggregate<E>> {
        match self {
            Tagged::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub fn into_event(self) -> Option<Event> {
        match self {
            Tagged::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl<E> From<Aggregate<E>> for Tagged<E> {
    fn from(aggregate: Aggregate<E>) -> Self {
        Tagged::Aggregate(aggregate)
    }
}

impl<E> From<Event> for Tagged<E> {
    fn from(event: Event) -> Self {
        Tagged::Event(event)
    }
}

impl<E> From<Value> for Tagged<E> {
    fn from(value: Value) -> Self {
        Tagged::Other(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Term = Tagged<String>;

    #[test]
    fn test_tag_of_typed_values() {
        let event: Term = Event::new("item_added", json!({})).into();
        assert_eq!(event.tag(), Some(EVENT_TAG));

        let aggregate: Term = Aggregate::new("cart", "A".to_string(), Vec::new()).into();
        assert_eq!(aggregate.tag(), Some(AGGREGATE_TAG));
    }

    #[test]
    fn test_tag_of_raw_tuple() {
        let raw: Term = json!(["test", "test"]).into();
        assert_eq!(raw.tag(), Some("test"));
        assert!(raw.is_tuple());
        assert_eq!(raw.as_raw_tuple().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_non_tuple_has_no_tag() {
        let raw: Term = json!({"aggregate": true}).into();
        assert_eq!(raw.tag(), None);
        assert!(!raw.is_tuple());

        let empty: Term = json!([]).into();
        assert_eq!(empty.tag(), None);
    }

    #[test]
    fn test_into_variants() {
        let event: Term = Event::new("x", json!(null)).into();
        assert!(event.clone().into_aggregate().is_none());
        assert!(event.into_event().is_some());
    }
}

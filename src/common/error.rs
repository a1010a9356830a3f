use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Domain Errors - Tagged error values
// ============================================================================
//
// Every fallible operation in the crate returns `DomainResult<T>`. The error
// carries a kind (which layer rejected the value) and a payload (a message or
// a structured JSON value).
//
// ============================================================================

pub const INDEX_OUT_OF_RANGE: &str = "index out of range";
pub const INVALID_TUPLE_ARITY: &str = "invalid tuple arity";
pub const INVALID_EVENT_TYPE: &str = "invalid event type";
pub const NOT_AGGREGATE_TYPE: &str = "given data is not aggregate type";
pub const UNKNOWN_DATA_TYPE: &str = "unknown given data type";

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Which layer produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Structural or bounds fault from low-level tuple access
    Exception,
    /// Value failed aggregate-shape validation
    Aggregate,
    /// Value failed event-shape validation
    Event,
    /// Unanticipated fault, caught and reported
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Exception => "exception",
            ErrorKind::Aggregate => "aggregate",
            ErrorKind::Event => "event",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload: plain text or a structured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Structured(serde_json::Value),
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Message(message) => f.write_str(message),
            ErrorPayload::Structured(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {payload}")]
pub struct DomainError {
    kind: ErrorKind,
    payload: ErrorPayload,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            payload: ErrorPayload::Message(message.into()),
        }
    }

    pub fn structured(kind: ErrorKind, value: serde_json::Value) -> Self {
        Self {
            kind,
            payload: ErrorPayload::Structured(value),
        }
    }

    pub fn exception(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Exception, message)
    }

    pub fn aggregate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Aggregate, message)
    }

    pub fn event(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Event, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn out_of_range() -> Self {
        Self::exception(INDEX_OUT_OF_RANGE)
    }

    pub fn invalid_arity() -> Self {
        Self::exception(INVALID_TUPLE_ARITY)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn payload(&self) -> &ErrorPayload {
        &self.payload
    }

    /// The text payload, if this error carries one
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            ErrorPayload::Message(message) => Some(message),
            ErrorPayload::Structured(_) => None,
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

use serde::{Deserialize, Serialize};

/// Events that can trigger query state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum QueryEvent {
    /// A point was supplied and the machine is free to start a cycle
    Requested,
    /// The geofence gate rejected the point before any query was issued
    BoundaryRejected,
    /// The aggregation barrier completed with a record
    Succeeded,
    /// Some underlying lookup rejected; the whole cycle failed
    Failed(String),
}

impl QueryEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::BoundaryRejected => "boundary_rejected",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// Extract error message if this is a failure event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Events that can trigger print state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PrintEvent {
    /// A print was requested for a point
    Requested,
    /// The submit/poll/fetch sequence produced an artifact location
    Succeeded,
    /// Some step of the sequence failed
    Failed(String),
    /// The in-flight workflow was cancelled before reaching a terminal state
    Cancelled,
    /// User-initiated retry with the retained point
    RetryRequested,
}

impl PrintEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
            Self::Cancelled => "cancelled",
            Self::RetryRequested => "retry_requested",
        }
    }

    /// Extract error message if this is a failure event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of one query-and-display cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryState {
    /// Waiting for a point
    Ready,
    /// Fan-out in flight for the current point
    Querying,
    /// An info record is on display
    Info,
}

impl QueryState {
    /// Check if a new query request must be dropped in this state
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Querying)
    }

    /// Check if a new cycle may start from this state
    pub fn accepts_request(&self) -> bool {
        matches!(self, Self::Ready | Self::Info)
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Querying => write!(f, "querying"),
            Self::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for QueryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "querying" => Ok(Self::Querying),
            "info" => Ok(Self::Info),
            _ => Err(format!("Invalid query state: {s}")),
        }
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Lifecycle states of one print workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintState {
    /// No live job
    Ready,
    /// Submit/poll/fetch sequence in flight
    Printing,
    /// Artifact location retained and available for download
    Printed,
    /// The sequence failed; retry is possible with the retained point
    Error,
}

impl PrintState {
    /// Check if a print request must be ignored in this state
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Printing)
    }

    /// Check if this is an error state that allows retry
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if a live job may exist in this state
    pub fn allows_live_job(&self) -> bool {
        !matches!(self, Self::Ready)
    }
}

impl fmt::Display for PrintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Printing => write!(f, "printing"),
            Self::Printed => write!(f, "printed"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for PrintState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "printing" => Ok(Self::Printing),
            "printed" => Ok(Self::Printed),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid print state: {s}")),
        }
    }
}

impl Default for PrintState {
    fn default() -> Self {
        Self::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_state_busy_check() {
        assert!(QueryState::Querying.is_busy());
        assert!(!QueryState::Ready.is_busy());
        assert!(!QueryState::Info.is_busy());
        assert!(QueryState::Ready.accepts_request());
        assert!(QueryState::Info.accepts_request());
        assert!(!QueryState::Querying.accepts_request());
    }

    #[test]
    fn test_print_state_predicates() {
        assert!(PrintState::Printing.is_busy());
        assert!(PrintState::Error.is_error());
        assert!(!PrintState::Ready.allows_live_job());
        assert!(PrintState::Printing.allows_live_job());
        assert!(PrintState::Printed.allows_live_job());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(QueryState::Querying.to_string(), "querying");
        assert_eq!("info".parse::<QueryState>().unwrap(), QueryState::Info);

        assert_eq!(PrintState::Printed.to_string(), "printed");
        assert_eq!("error".parse::<PrintState>().unwrap(), PrintState::Error);
        assert!("bogus".parse::<PrintState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let state = QueryState::Querying;
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"querying\"");

        let parsed: PrintState = serde_json::from_str("\"printing\"").unwrap();
        assert_eq!(parsed, PrintState::Printing);
    }

    #[test]
    fn test_default_states() {
        assert_eq!(QueryState::default(), QueryState::Ready);
        assert_eq!(PrintState::default(), PrintState::Ready);
    }
}

//! Error types for the flood map core.

use thiserror::Error;

/// Error taxonomy for the query and print workflows.
///
/// A point falling outside the serviceable boundary is not an error; it is a
/// normal gate outcome reported through
/// [`QueryOutcome`](crate::state_machine::QueryOutcome).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloodMapError {
    /// An attribute or elevation lookup in the fan-out rejected.
    #[error("Query failure: {0}")]
    QueryFailure(String),
    /// The print job submission call itself failed.
    #[error("Print job submission failed: {0}")]
    SubmissionFailure(String),
    /// A job status poll call failed, or polling exceeded its attempt ceiling.
    #[error("Print job poll failed: {0}")]
    PollFailure(String),
    /// The job resolved to a status other than submitted/executing/succeeded.
    #[error("Print job failed: {0}")]
    JobFailed(String),
    /// The succeeded job's output parameter could not be resolved to a URL.
    #[error("Print result fetch failed: {0}")]
    ResultFetchFailure(String),
    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FloodMapError {
    /// Short stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QueryFailure(_) => "query_failure",
            Self::SubmissionFailure(_) => "submission_failure",
            Self::PollFailure(_) => "poll_failure",
            Self::JobFailed(_) => "job_failed",
            Self::ResultFetchFailure(_) => "result_fetch_failure",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::ConfigurationError(_) => "configuration_error",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for FloodMapError {
    fn from(error: serde_json::Error) -> Self {
        FloodMapError::Internal(format!("JSON serialization error: {error}"))
    }
}

pub type FloodMapResult<T> = Result<T, FloodMapError>;

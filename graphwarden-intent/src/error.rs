//! Pipeline error types
//!
//! The pipeline does no local recovery: every failure is surfaced
//! unmodified to the request boundary, which owns the translation into a
//! client-visible response.

use thiserror::Error;

/// Errors produced while processing one intent
#[derive(Debug, Error)]
pub enum IntentError {
    /// The upstream endpoint could not be reached (or the bounded timeout
    /// elapsed before a response arrived)
    #[error("upstream request failed: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    /// The upstream endpoint answered with a non-success status; `body` is
    /// its response body, verbatim
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream response body could not be loaded as a graph payload
    /// in its declared format
    #[error("unusable upstream payload: {0}")]
    UpstreamPayload(String),

    /// The caller-supplied query failed to parse or execute against the
    /// snapshot. A caller fault, never a server fault.
    #[error("query rejected: {0}")]
    QueryExecution(String),

    /// The request-scoped snapshot store could not be created
    #[error("snapshot store failure: {0}")]
    Snapshot(String),
}

impl IntentError {
    /// True for failures of the upstream fetch (transport, status, or
    /// payload), as opposed to caller faults
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            IntentError::UpstreamTransport(_)
                | IntentError::UpstreamStatus { .. }
                | IntentError::UpstreamPayload(_)
        )
    }

    /// True when the bounded upstream timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, IntentError::UpstreamTransport(e) if e.is_timeout())
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, IntentError>;

//! Issue tracker client abstraction.
//!
//! "Ticket not found" is a valid status, never an error; transport
//! failure is a distinct signal the caller must handle explicitly.
//! In-memory fakes are provided for testing via the `fakes` module.

use async_trait::async_trait;
use thiserror::Error;

/// Result of a successful tracker lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// The ticket exists; `resolved` is true once a resolution is set.
    Found { resolved: bool },

    /// No ticket with the given identifier.
    NotFound,
}

impl TicketStatus {
    /// An existing ticket with no resolution set.
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::Found { resolved: false })
    }
}

/// Errors the tracker client can signal.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The tracker could not be reached or could not answer.
    #[error("Issue tracker unreachable: {reason}")]
    Unreachable { reason: String },
}

/// Result type for tracker operations
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// A remote issue tracker.
///
/// Implementations must be safe for concurrent use: the filter may be
/// driven in parallel across heads by the surrounding enumeration.
/// Timeout and retry behavior, if any, belongs to the implementation;
/// callers resolve a single failed lookup via their fail-open policy.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Look up a ticket by its bare identifier (e.g. `JENKINS-1234`).
    async fn lookup(&self, id: &str) -> TrackerResult<TicketStatus>;
}

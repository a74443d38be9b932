//! In-memory fakes for the tracker client (testing only)
//!
//! Provides `StaticTracker` and `UnreachableTracker` that satisfy the
//! `TrackerClient` contract without any network dependency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::tracker::{TicketStatus, TrackerClient, TrackerError, TrackerResult};

// ---------------------------------------------------------------------------
// StaticTracker
// ---------------------------------------------------------------------------

/// Tracker backed by a fixed identifier-to-status map.
///
/// Unknown identifiers resolve to `NotFound`. Lookups are counted so
/// tests can assert the validator's short-circuit behavior.
#[derive(Debug, Default)]
pub struct StaticTracker {
    statuses: HashMap<String, TicketStatus>,
    lookups: AtomicUsize,
}

impl StaticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a status for an identifier.
    pub fn with_ticket(mut self, id: impl Into<String>, status: TicketStatus) -> Self {
        self.statuses.insert(id.into(), status);
        self
    }

    /// Script an existing, unresolved ticket.
    pub fn with_open_ticket(self, id: impl Into<String>) -> Self {
        self.with_ticket(id, TicketStatus::Found { resolved: false })
    }

    /// Script an existing, resolved ticket.
    pub fn with_resolved_ticket(self, id: impl Into<String>) -> Self {
        self.with_ticket(id, TicketStatus::Found { resolved: true })
    }

    /// Number of lookups performed so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackerClient for StaticTracker {
    async fn lookup(&self, id: &str) -> TrackerResult<TicketStatus> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .statuses
            .get(id)
            .copied()
            .unwrap_or(TicketStatus::NotFound))
    }
}

// ---------------------------------------------------------------------------
// UnreachableTracker
// ---------------------------------------------------------------------------

/// Tracker whose every lookup fails with a transport error.
#[derive(Debug, Default)]
pub struct UnreachableTracker {
    lookups: AtomicUsize,
}

impl UnreachableTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups attempted so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackerClient for UnreachableTracker {
    async fn lookup(&self, _id: &str) -> TrackerResult<TicketStatus> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(TrackerError::Unreachable {
            reason: "connection refused".to_string(),
        })
    }
}

//! The single-open-ticket decision engine.
//!
//! Evaluates a change request title against one configured tracker
//! server and produces a [`ValidationVerdict`] - the pass/fail decision
//! plus the policy outcome that produced it. No error ever propagates
//! out of the validator: infrastructure failures (configuration drift,
//! unreachable tracker) fail open, ambiguous or reference-free titles
//! fail closed.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ServerRegistry;
use crate::tracker::{TrackerClient, TrackerError};

/// The policy outcome behind a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    /// Exactly one reference, and its ticket exists unresolved.
    OpenTicket,

    /// The title contains no recognizable ticket reference.
    NoTicketReference,

    /// The single referenced ticket is missing or already resolved.
    TicketNotOpen,

    /// More than one ticket reference; the policy refuses to guess
    /// which one governs.
    AmbiguousTitle,

    /// The configured server index no longer exists (fail-open).
    ConfigurationDrift,

    /// The tracker could not be reached (fail-open).
    TrackerUnreachable,
}

/// The outcome of validating one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    /// Whether the title passes the single-open-ticket policy.
    pub is_valid: bool,

    /// Why.
    pub reason: VerdictReason,
}

impl ValidationVerdict {
    fn valid(reason: VerdictReason) -> Self {
        Self {
            is_valid: true,
            reason,
        }
    }

    fn invalid(reason: VerdictReason) -> Self {
        Self {
            is_valid: false,
            reason,
        }
    }
}

/// Title validator over a registry snapshot and a shared tracker client.
///
/// Holds no mutable state; safe to share across heads being filtered
/// in parallel.
pub struct TitleValidator {
    registry: ServerRegistry,
    tracker: Arc<dyn TrackerClient>,
}

impl TitleValidator {
    pub fn new(registry: ServerRegistry, tracker: Arc<dyn TrackerClient>) -> Self {
        Self { registry, tracker }
    }

    /// Whether `title` references exactly one currently-open ticket.
    ///
    /// Boolean projection of [`TitleValidator::validate`].
    pub async fn contains_open_ticket(&self, title: &str, server_idx: usize) -> bool {
        self.validate(title, server_idx).await.is_valid
    }

    /// Evaluate `title` against the server at `server_idx`.
    ///
    /// Policy:
    /// - server index out of range: valid (fail-open, the server list
    ///   drifted underneath the persisted settings)
    /// - a second ticket reference: invalid immediately, the tracker is
    ///   never queried for it
    /// - tracker unreachable: valid (fail-open, not retried)
    /// - otherwise valid iff the single reference names an existing,
    ///   unresolved ticket
    pub async fn validate(&self, title: &str, server_idx: usize) -> ValidationVerdict {
        let Some(server) = self.registry.server(server_idx) else {
            debug!(
                server_idx,
                servers = self.registry.len(),
                "configured tracker server no longer exists, passing title through"
            );
            return ValidationVerdict::valid(VerdictReason::ConfigurationDrift);
        };

        let mut has_open_ticket = false;
        let mut seen = 0usize;

        for reference in server.pattern.find_references(title) {
            seen += 1;
            if seen > 1 {
                debug!(title, "title references more than one ticket, rejecting");
                return ValidationVerdict::invalid(VerdictReason::AmbiguousTitle);
            }

            match self.tracker.lookup(&reference.id).await {
                Ok(status) => {
                    if status.is_open() {
                        has_open_ticket = true;
                    }
                }
                Err(TrackerError::Unreachable { reason }) => {
                    warn!(
                        ticket = %reference.id,
                        server = %server.base_url,
                        %reason,
                        "tracker unreachable, passing title through"
                    );
                    return ValidationVerdict::valid(VerdictReason::TrackerUnreachable);
                }
            }
        }

        if has_open_ticket {
            ValidationVerdict::valid(VerdictReason::OpenTicket)
        } else if seen == 0 {
            ValidationVerdict::invalid(VerdictReason::NoTicketReference)
        } else {
            ValidationVerdict::invalid(VerdictReason::TicketNotOpen)
        }
    }
}

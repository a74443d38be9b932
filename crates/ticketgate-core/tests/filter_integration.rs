//! Integration tests for the head filter with the in-memory tracker fakes.

use std::sync::Arc;

use ticketgate_core::fakes::{StaticTracker, UnreachableTracker};
use ticketgate_core::{
    BranchNameKey, ChangeRequest, ChangeRequestFilter, ScmHead, ServerRegistry, TicketPattern,
    TitleValidator, TrackerClient, ValidatorSettings,
};

fn registry() -> ServerRegistry {
    let mut registry = ServerRegistry::new();
    registry.add_server(
        "https://issues.example.org",
        TicketPattern::new(r"\[?([A-Z]+-\d+)\]?").expect("pattern compiles"),
    );
    registry
}

fn pull(number: u64, branch: &str, title: &str) -> ChangeRequest {
    ChangeRequest {
        number,
        source_branch: branch.to_string(),
        title: title.to_string(),
    }
}

fn head(branch: &str) -> ScmHead {
    ScmHead::ChangeRequest {
        name: branch.to_string(),
    }
}

/// Scenario: one open ticket in the title, tracker answers, head kept.
#[tokio::test]
async fn open_ticket_head_is_kept() {
    let tracker = Arc::new(
        StaticTracker::new().with_ticket(
            "JIRA-42",
            ticketgate_core::TicketStatus::Found { resolved: false },
        ),
    );
    let filter = ChangeRequestFilter::new(
        TitleValidator::new(registry(), tracker),
        BranchNameKey,
        ValidatorSettings::new(0),
    );

    let pulls = vec![pull(1, "feature/fix", "Fix bug [JIRA-42]")];
    assert!(!filter.is_excluded(&head("feature/fix"), &pulls).await);
}

/// Scenario: two references, head excluded, tracker queried at most once.
#[tokio::test]
async fn ambiguous_title_head_is_excluded_without_second_lookup() {
    let tracker = Arc::new(
        StaticTracker::new()
            .with_ticket(
                "JIRA-1",
                ticketgate_core::TicketStatus::Found { resolved: false },
            )
            .with_ticket(
                "JIRA-2",
                ticketgate_core::TicketStatus::Found { resolved: false },
            ),
    );
    let filter = ChangeRequestFilter::new(
        TitleValidator::new(registry(), Arc::clone(&tracker) as Arc<dyn TrackerClient>),
        BranchNameKey,
        ValidatorSettings::new(0),
    );

    let pulls = vec![pull(1, "feature/both", "Touches JIRA-1 and JIRA-2")];
    assert!(filter.is_excluded(&head("feature/both"), &pulls).await);
    assert!(tracker.lookup_count() <= 1);
}

/// Scenario: no ticket reference at all, head excluded.
#[tokio::test]
async fn referenceless_title_head_is_excluded() {
    let tracker = Arc::new(StaticTracker::new());
    let filter = ChangeRequestFilter::new(
        TitleValidator::new(registry(), Arc::clone(&tracker) as Arc<dyn TrackerClient>),
        BranchNameKey,
        ValidatorSettings::new(0),
    );

    let pulls = vec![pull(1, "chore/cleanup", "misc cleanup")];
    assert!(filter.is_excluded(&head("chore/cleanup"), &pulls).await);
    assert_eq!(tracker.lookup_count(), 0);
}

/// Scenario: tracker transport failure, head kept (fail-open).
#[tokio::test]
async fn unreachable_tracker_keeps_head() {
    let tracker = Arc::new(UnreachableTracker::new());
    let filter = ChangeRequestFilter::new(
        TitleValidator::new(registry(), tracker),
        BranchNameKey,
        ValidatorSettings::new(0),
    );

    let pulls = vec![pull(1, "feature/fix", "Fix bug [JIRA-42]")];
    assert!(!filter.is_excluded(&head("feature/fix"), &pulls).await);
}

/// Scenario: persisted index points past the current server list, head
/// kept (fail-open). Pins the index == len boundary of the drift check.
#[tokio::test]
async fn stale_server_index_keeps_head() {
    let tracker = Arc::new(StaticTracker::new());
    let filter = ChangeRequestFilter::new(
        TitleValidator::new(registry(), Arc::clone(&tracker) as Arc<dyn TrackerClient>),
        BranchNameKey,
        ValidatorSettings::new(1),
    );

    let pulls = vec![pull(1, "chore/cleanup", "misc cleanup")];
    assert!(!filter.is_excluded(&head("chore/cleanup"), &pulls).await);
    assert_eq!(tracker.lookup_count(), 0);
}

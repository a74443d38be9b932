//! Per-head exclusion of change requests with invalid titles.
//!
//! One generic filter parameterized by a provider-specific match-key
//! strategy; the hosting providers differ only in how a head name maps
//! to "its" change request (source branch name vs. a synthesized
//! `PR-<number>` label).

use tracing::debug;

use crate::config::ValidatorSettings;
use crate::validator::TitleValidator;

/// A head handed to us by the surrounding enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmHead {
    /// A plain branch; never excluded by this filter.
    Branch { name: String },

    /// A change request head, named by the provider-specific identifier.
    ChangeRequest { name: String },
}

impl ScmHead {
    pub fn name(&self) -> &str {
        match self {
            ScmHead::Branch { name } => name,
            ScmHead::ChangeRequest { name } => name,
        }
    }
}

/// Read-only view of an open change request, as supplied by the
/// hosting-provider source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    /// Provider-assigned display number.
    pub number: u64,

    /// Name of the branch the change request comes from.
    pub source_branch: String,

    /// Free-text title, the subject of validation.
    pub title: String,
}

/// How a provider derives the key matched against a head name.
pub trait MatchKeyStrategy: Send + Sync {
    fn match_key(&self, candidate: &ChangeRequest) -> String;
}

/// Match by source branch name (Bitbucket-style sources).
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchNameKey;

impl MatchKeyStrategy for BranchNameKey {
    fn match_key(&self, candidate: &ChangeRequest) -> String {
        candidate.source_branch.clone()
    }
}

/// Match by synthesized `PR-<number>` label (GitHub-style sources).
#[derive(Debug, Clone, Copy, Default)]
pub struct PullNumberKey;

impl MatchKeyStrategy for PullNumberKey {
    fn match_key(&self, candidate: &ChangeRequest) -> String {
        format!("PR-{}", candidate.number)
    }
}

/// Excludes change-request heads whose titles fail the
/// single-open-ticket policy.
///
/// Built from unselected settings the filter is inert, mirroring the
/// configuration surface that only installs it once a server is chosen.
pub struct ChangeRequestFilter<S: MatchKeyStrategy> {
    validator: TitleValidator,
    strategy: S,
    settings: ValidatorSettings,
}

impl<S: MatchKeyStrategy> ChangeRequestFilter<S> {
    pub fn new(validator: TitleValidator, strategy: S, settings: ValidatorSettings) -> Self {
        Self {
            validator,
            strategy,
            settings,
        }
    }

    /// Whether `head` should be excluded from further processing.
    ///
    /// Branch heads pass through. A change-request head is resolved to
    /// the first candidate (in provided order) whose match key equals
    /// the head name; a head with no matching candidate is never
    /// excluded. On a match, excluded iff the title fails validation.
    pub async fn is_excluded(&self, head: &ScmHead, candidates: &[ChangeRequest]) -> bool {
        let ScmHead::ChangeRequest { name } = head else {
            return false;
        };
        let Some(server_idx) = self.settings.server_index() else {
            return false;
        };

        for candidate in candidates {
            if self.strategy.match_key(candidate) == *name {
                let excluded = !self
                    .validator
                    .contains_open_ticket(&candidate.title, server_idx)
                    .await;
                if excluded {
                    debug!(
                        head = %name,
                        number = candidate.number,
                        title = %candidate.title,
                        "excluding change request, title fails ticket validation"
                    );
                }
                return excluded;
            }
        }

        false
    }
}

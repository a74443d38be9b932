//! Error types for ticketgate-core

use thiserror::Error;

/// Errors that can occur while building gate configuration.
///
/// These surface at configuration time only; the validation and
/// filtering paths never return errors (every failure resolves to a
/// boolean verdict via the fail-open/fail-closed policy).
#[derive(Error, Debug)]
pub enum GateError {
    /// The ticket pattern failed to compile
    #[error("Invalid ticket pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The ticket pattern does not expose the identifier capture group
    #[error(
        "Ticket pattern must have exactly one capture group for the bare identifier, found {found}"
    )]
    WrongGroupCount { found: usize },

    /// No tracker server was selected in the filter settings
    #[error("You have to choose a Jira server")]
    NoServerSelected,
}

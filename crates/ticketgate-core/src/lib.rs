//! ticketgate core - title validation for SCM head filtering
//!
//! Decides whether a change request's title references exactly one
//! currently-open ticket in an issue tracker, and adapts that verdict
//! into an include/exclude decision during head enumeration:
//! - `TicketPattern`: extracts ticket references from free-text titles
//! - `TrackerClient`: backend-agnostic issue tracker lookup
//! - `TitleValidator`: the single-open-ticket decision engine
//! - `ChangeRequestFilter`: per-head exclusion, provider-parameterized
//!
//! In-memory fakes for the tracker client are provided for testing via
//! the `fakes` module.

pub mod config;
pub mod error;
pub mod fakes;
pub mod filter;
pub mod pattern;
pub mod tracker;
pub mod validator;

pub use config::{ServerRegistry, TrackerServerConfig, ValidatorSettings};
pub use error::GateError;
pub use filter::{
    BranchNameKey, ChangeRequest, ChangeRequestFilter, MatchKeyStrategy, PullNumberKey, ScmHead,
};
pub use pattern::{TicketPattern, TicketReference};
pub use tracker::{TicketStatus, TrackerClient, TrackerError, TrackerResult};
pub use validator::{TitleValidator, ValidationVerdict, VerdictReason};

//! Jira REST implementation of the ticketgate tracker client.
//!
//! Resolves ticket identifiers against Jira's issue endpoint, mapping
//! "issue not found" to a valid status and transport failures to the
//! distinct unreachable signal the validator fails open on.

pub mod client;

pub use client::{JiraClient, JiraConfig, JiraError};

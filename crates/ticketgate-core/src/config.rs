//! Tracker server configuration and persisted filter settings.
//!
//! The registry is an explicit value passed into the validator at
//! construction time - there is no ambient process-wide lookup. Server
//! indices are positional, not stable identifiers: a verdict is only
//! meaningful relative to the registry snapshot used to produce it.

use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::pattern::TicketPattern;

/// One configured tracker server.
///
/// Created at configuration-load time and immutable thereafter;
/// replaced wholesale when the administrator's server list changes.
#[derive(Debug, Clone)]
pub struct TrackerServerConfig {
    /// Position in the registry; referenced by persisted filter settings.
    pub index: usize,

    /// Tracker base URL, e.g. `https://issues.example.org`.
    pub base_url: String,

    /// Compiled ticket-reference pattern for this server.
    pub pattern: TicketPattern,
}

/// Ordered list of configured tracker servers.
#[derive(Debug, Clone, Default)]
pub struct ServerRegistry {
    servers: Vec<TrackerServerConfig>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a server, returning its positional index.
    pub fn add_server(&mut self, base_url: impl Into<String>, pattern: TicketPattern) -> usize {
        let index = self.servers.len();
        self.servers.push(TrackerServerConfig {
            index,
            base_url: base_url.into(),
            pattern,
        });
        index
    }

    /// All configured servers, in registration order.
    pub fn servers(&self) -> &[TrackerServerConfig] {
        &self.servers
    }

    /// Resolve a positional index against the current list.
    ///
    /// Out-of-range indices (including the `index == len` boundary)
    /// resolve to `None`; the validator treats that as configuration
    /// drift.
    pub fn server(&self, index: usize) -> Option<&TrackerServerConfig> {
        self.servers.get(index)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Sentinel for "no server selected yet".
pub const SERVER_UNSELECTED: i64 = -1;

/// Persisted per-filter settings.
///
/// Only the integer server index is stored alongside the other filter
/// settings; `-1` means the administrator has not chosen a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSettings {
    /// Positional index into the server registry, or `-1` if unselected.
    #[serde(default = "default_server_idx")]
    pub server_idx: i64,
}

fn default_server_idx() -> i64 {
    SERVER_UNSELECTED
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            server_idx: SERVER_UNSELECTED,
        }
    }
}

impl ValidatorSettings {
    pub fn new(server_idx: i64) -> Self {
        Self { server_idx }
    }

    /// Whether a server has been selected.
    pub fn is_selected(&self) -> bool {
        self.server_idx > SERVER_UNSELECTED
    }

    /// Reject unselected settings at the configuration surface.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.is_selected() {
            Ok(())
        } else {
            Err(GateError::NoServerSelected)
        }
    }

    /// The selected index as a registry position, if any.
    pub fn server_index(&self) -> Option<usize> {
        usize::try_from(self.server_idx).ok()
    }
}

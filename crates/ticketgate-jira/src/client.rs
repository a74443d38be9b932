//! Jira REST tracker client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use ticketgate_core::{TicketStatus, TrackerClient, TrackerError, TrackerResult};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while building the Jira client.
#[derive(Error, Debug)]
pub enum JiraError {
    /// Base URL missing from the environment
    #[error("JIRA_URL is not set")]
    MissingBaseUrl,

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Jira connection configuration.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Jira base URL, e.g. `https://issues.example.org`.
    pub base_url: String,

    /// Basic-auth credentials (user, API token), if the instance
    /// requires authentication.
    pub credentials: Option<(String, String)>,

    /// Per-request timeout. Timeout behavior lives here, in the client
    /// collaborator; the validator never retries.
    pub timeout: Duration,
}

impl JiraConfig {
    /// Config for a specific server, unauthenticated.
    pub fn new(base_url: &str) -> Self {
        JiraConfig {
            base_url: base_url.to_string(),
            credentials: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from `JIRA_URL`, `JIRA_USER` and `JIRA_TOKEN`.
    pub fn from_env() -> Result<Self, JiraError> {
        let base_url = std::env::var("JIRA_URL").map_err(|_| JiraError::MissingBaseUrl)?;
        let credentials = match (std::env::var("JIRA_USER"), std::env::var("JIRA_TOKEN")) {
            (Ok(user), Ok(token)) => Some((user, token)),
            _ => None,
        };
        Ok(JiraConfig {
            base_url,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, user: &str, token: &str) -> Self {
        self.credentials = Some((user.to_string(), token.to_string()));
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Jira tracker client over a shared `reqwest::Client`.
///
/// Cheap to clone and safe for concurrent use; the underlying client
/// pools connections across parallel lookups.
#[derive(Debug, Clone)]
pub struct JiraClient {
    config: JiraConfig,
    http: reqwest::Client,
}

impl JiraClient {
    /// Create a new Jira client.
    pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ticketgate/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(JiraClient { config, http })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, JiraError> {
        Self::new(JiraConfig::from_env()?)
    }

    fn issue_url(&self, id: &str) -> String {
        format!(
            "{}/rest/api/2/issue/{}?fields=resolution",
            self.config.base_url.trim_end_matches('/'),
            id
        )
    }
}

#[async_trait]
impl TrackerClient for JiraClient {
    async fn lookup(&self, id: &str) -> TrackerResult<TicketStatus> {
        let mut request = self.http.get(self.issue_url(id));
        if let Some((user, token)) = &self.config.credentials {
            request = request.basic_auth(user, Some(token));
        }

        let response = request.send().await.map_err(|e| {
            warn!(ticket = %id, error = %e, "Jira request failed");
            TrackerError::Unreachable {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(ticket = %id, "issue not found");
            return Ok(TicketStatus::NotFound);
        }
        if !status.is_success() {
            // Auth failures and server errors mean Jira could not
            // answer the question; the caller's fail-open policy
            // applies, so this is unreachable rather than not-found.
            warn!(ticket = %id, %status, "unexpected Jira response status");
            return Err(TrackerError::Unreachable {
                reason: format!("unexpected HTTP status {status}"),
            });
        }

        let issue: IssueResponse =
            response
                .json()
                .await
                .map_err(|e| TrackerError::Unreachable {
                    reason: format!("invalid issue payload: {e}"),
                })?;
        let resolved = issue.fields.resolution.is_some();
        debug!(ticket = %id, resolved, "issue resolved status fetched");
        Ok(TicketStatus::Found { resolved })
    }
}

/// Issue payload, trimmed to the resolution field.
#[derive(Debug, Deserialize)]
struct IssueResponse {
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Debug, Deserialize, Default)]
struct IssueFields {
    resolution: Option<Resolution>,
}

#[derive(Debug, Deserialize)]
struct Resolution {
    #[serde(default)]
    #[allow(dead_code)]
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_url_strips_trailing_slash() {
        let client = JiraClient::new(JiraConfig::new("https://issues.example.org/")).unwrap();
        assert_eq!(
            client.issue_url("JIRA-42"),
            "https://issues.example.org/rest/api/2/issue/JIRA-42?fields=resolution"
        );
    }

    #[test]
    fn open_issue_has_null_resolution() {
        let issue: IssueResponse =
            serde_json::from_str(r#"{"fields": {"resolution": null}}"#).unwrap();
        assert!(issue.fields.resolution.is_none());
    }

    #[test]
    fn resolved_issue_carries_resolution_object() {
        let issue: IssueResponse =
            serde_json::from_str(r#"{"fields": {"resolution": {"name": "Fixed"}}}"#).unwrap();
        assert_eq!(issue.fields.resolution.unwrap().name.as_deref(), Some("Fixed"));
    }

    #[test]
    fn missing_fields_default_to_open() {
        let issue: IssueResponse = serde_json::from_str("{}").unwrap();
        assert!(issue.fields.resolution.is_none());
    }

    #[test]
    fn from_env_requires_base_url() {
        // run with the variable absent in the test environment
        std::env::remove_var("JIRA_URL");
        assert!(matches!(
            JiraConfig::from_env(),
            Err(JiraError::MissingBaseUrl)
        ));
    }

    #[tokio::test]
    async fn connection_failure_maps_to_unreachable() {
        // nothing listens on the discard port
        let config = JiraConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(1));
        let client = JiraClient::new(config).unwrap();
        let err = client.lookup("JIRA-42").await.unwrap_err();
        assert!(matches!(err, TrackerError::Unreachable { .. }));
    }
}

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

use repoview_core::RepoId;

use crate::error::{GitHubError, Result};
use crate::models::*;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("repoview/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client (unauthenticated, read-only)
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
    user_agent: String,
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a client with explicit timeout and User-Agent
    pub fn with_options(base_url: &str, timeout: Duration, user_agent: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a repo-scoped URL
    fn repo_url(&self, repo: &RepoId, path: &str) -> String {
        format!("{}{}{}", self.base_url, repo.api_path(), path)
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // Try to read error body
        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Try to parse as GitHub error response
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        Err(GitHubError::Api { status, message })
    }

    /// GET a URL and decode the JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let response = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(GitHubError::Http)?;

        debug!(url, status = response.status().as_u16(), "Response");

        let mut response = self.check_response(response)?;
        let body = response.body_mut().read_to_string()?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    // ==================== Repository Operations ====================

    /// Get a specific repository
    pub fn get_repo(&self, repo: &RepoId) -> Result<GitHubRepo> {
        let url = self.repo_url(repo, "");

        self.get_json(&url).map_err(|err| match err {
            GitHubError::Api { status: 404, .. } => GitHubError::RepositoryNotFound(repo.to_string()),
            other => other,
        })
    }

    // ==================== Issue Operations ====================

    /// List one page of issues for the repository
    ///
    /// The issues endpoint also returns pull requests; they are kept so a page
    /// holds exactly what the API paged.
    pub fn list_issues(
        &self,
        repo: &RepoId,
        state: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<GitHubIssue>> {
        let url = format!(
            "{}?state={}&per_page={}&page={}",
            self.repo_url(repo, "/issues"),
            urlencoding::encode(state),
            per_page,
            page
        );

        self.get_json(&url)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

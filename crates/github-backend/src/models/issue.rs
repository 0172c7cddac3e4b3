use serde::{Deserialize, Serialize};

use super::label::GitHubLabel;

/// GitHub user (minimal representation)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
}

/// GitHub issue as returned by `/repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// Null when the author account was deleted
    pub user: Option<GitHubUser>,
    #[serde(default)]
    pub comments: u64,
    pub created_at: Option<String>,
}

//! Implementation of the repoview-core source trait for GitHubClient

use repoview_core::{FetchError, Issue, IssueQuery, RepoId, Repository, RepositorySource, Result};

use crate::client::GitHubClient;

impl RepositorySource for GitHubClient {
    fn repository(&self, repo: &RepoId) -> Result<Repository> {
        let repository = self.get_repo(repo).map_err(FetchError::from)?;
        Ok(repository.into())
    }

    fn issues(&self, repo: &RepoId, query: &IssueQuery) -> Result<Vec<Issue>> {
        let issues = self
            .list_issues(repo, query.state.as_str(), query.per_page, query.page)
            .map_err(FetchError::from)?;

        Ok(issues.into_iter().map(Issue::from).collect())
    }
}

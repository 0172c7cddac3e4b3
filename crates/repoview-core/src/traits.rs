use crate::error::Result;
use crate::models::{Issue, Repository};
use crate::route::RepoId;
use crate::view::IssueQuery;

/// Read-only source of repository data
///
/// The GitHub backend implements this over HTTP. Implementations must be
/// shareable across threads because the initial load issues both requests
/// concurrently.
pub trait RepositorySource: Send + Sync {
    /// Fetch repository metadata
    fn repository(&self, repo: &RepoId) -> Result<Repository>;

    /// Fetch one page of issues
    fn issues(&self, repo: &RepoId, query: &IssueQuery) -> Result<Vec<Issue>>;
}

impl<T: RepositorySource + ?Sized> RepositorySource for std::sync::Arc<T> {
    fn repository(&self, repo: &RepoId) -> Result<Repository> {
        (**self).repository(repo)
    }

    fn issues(&self, repo: &RepoId, query: &IssueQuery) -> Result<Vec<Issue>> {
        (**self).issues(repo, query)
    }
}

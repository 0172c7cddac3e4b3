use std::thread;

use tracing::debug;

use crate::error::Result;
use crate::models::{Issue, Repository};
use crate::route::RepoId;
use crate::traits::RepositorySource;
use crate::view::{IssueQuery, PER_PAGE};

/// Everything needed to leave the loading state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub repository: Repository,
    pub issues: Vec<Issue>,
}

/// Fetch repository metadata and one issue page concurrently.
///
/// Both requests always run to completion. If either fails, the error is
/// returned and neither result is used; a repository error wins over an
/// issue error.
pub fn load_page<S>(source: &S, repo: &RepoId, query: &IssueQuery) -> Result<PageData>
where
    S: RepositorySource + ?Sized,
{
    debug!(repo = %repo, state = %query.state, page = query.page, "Loading page");

    let (repository, issues) = thread::scope(|scope| {
        let repository = scope.spawn(|| source.repository(repo));
        let issues = scope.spawn(|| source.issues(repo, query));
        (join(repository), join(issues))
    });

    let repository = repository?;
    let mut issues = issues?;
    issues.truncate(PER_PAGE as usize);

    Ok(PageData { repository, issues })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}

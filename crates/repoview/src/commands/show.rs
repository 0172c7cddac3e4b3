use crate::cli::OutputFormat;
use crate::output::output_page;
use anyhow::{Context, Result};
use repoview_core::{load_page, IssueFilter, PageModel, Phase, RepoId, RepositorySource, ViewState};

/// Load the repository and one issue page, print them, and exit
pub fn handle_show(
    source: &dyn RepositorySource,
    repo: RepoId,
    state: IssueFilter,
    page: u32,
    format: OutputFormat,
) -> Result<()> {
    let model = load(source, repo, ViewState::new(state, page));

    if let Phase::Failed(err) = model.phase() {
        return Err(err.clone())
            .with_context(|| format!("Failed to load repository '{}'", model.repo()));
    }

    output_page(&model, format, false);
    Ok(())
}

fn load(source: &dyn RepositorySource, repo: RepoId, view: ViewState) -> PageModel {
    let mut model = PageModel::with_view(repo, view);
    let ticket = model.begin_initial();
    let result = load_page(source, model.repo(), &ticket.query);
    model.finish_initial(ticket, result);
    model
}

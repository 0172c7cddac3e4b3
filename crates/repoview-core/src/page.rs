//! The page model: everything the repository view renders, plus the rules for
//! applying fetch results to it

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::loader::PageData;
use crate::models::{Issue, Repository};
use crate::route::RepoId;
use crate::view::{IssueFilter, IssueQuery, RequestTracker, ViewCommand, ViewState, PER_PAGE};

/// Lifecycle of the initial load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed(FetchError),
}

/// Which kind of request a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    /// Repository metadata plus the first issue page
    Initial,
    /// Issue page only
    Reload,
}

/// Handle for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: TicketKind,
    pub query: IssueQuery,
}

/// Result of handing a response back to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request was issued or the view moved on
    Discarded,
}

#[derive(Debug)]
pub struct PageModel {
    repo: RepoId,
    view: ViewState,
    phase: Phase,
    repository: Option<Repository>,
    issues: Vec<Issue>,
    reload_error: Option<FetchError>,
    requests: RequestTracker,
}

impl PageModel {
    pub fn new(repo: RepoId) -> Self {
        Self::with_view(repo, ViewState::default())
    }

    /// Start at a specific filter and page instead of open/1
    pub fn with_view(repo: RepoId, view: ViewState) -> Self {
        Self {
            repo,
            view,
            phase: Phase::Loading,
            repository: None,
            issues: Vec::new(),
            reload_error: None,
            requests: RequestTracker::new(),
        }
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Error from the last reload, if it failed
    pub fn reload_error(&self) -> Option<&FetchError> {
        self.reload_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Enter the loading state and issue the initial request
    pub fn begin_initial(&mut self) -> Ticket {
        self.phase = Phase::Loading;
        self.reload_error = None;
        self.ticket(TicketKind::Initial)
    }

    /// Apply a filter or page command. Returns the reload to issue, or `None`
    /// when nothing changed or the page is not ready yet.
    pub fn dispatch(&mut self, command: ViewCommand) -> Option<Ticket> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.view.apply(command)?;
        Some(self.ticket(TicketKind::Reload))
    }

    /// Re-issue whatever failed last. `None` if nothing failed.
    pub fn retry(&mut self) -> Option<Ticket> {
        match self.phase {
            Phase::Failed(_) => Some(self.begin_initial()),
            Phase::Ready if self.reload_error.is_some() => Some(self.ticket(TicketKind::Reload)),
            _ => None,
        }
    }

    fn ticket(&mut self, kind: TicketKind) -> Ticket {
        Ticket {
            seq: self.requests.begin(),
            kind,
            query: self.view.query(),
        }
    }

    fn accepts(&self, ticket: &Ticket, kind: TicketKind) -> bool {
        ticket.kind == kind
            && self.requests.is_current(ticket.seq)
            && ticket.query == self.view.query()
    }

    /// Apply the result of an initial load
    pub fn finish_initial(
        &mut self,
        ticket: Ticket,
        result: Result<PageData, FetchError>,
    ) -> Outcome {
        if !self.accepts(&ticket, TicketKind::Initial) {
            debug!(seq = ticket.seq, "Discarding stale initial load");
            return Outcome::Discarded;
        }

        match result {
            Ok(data) => {
                info!(
                    repo = %self.repo,
                    issues = data.issues.len(),
                    "Repository loaded"
                );
                self.repository = Some(data.repository);
                self.replace_issues(data.issues);
                self.phase = Phase::Ready;
            }
            Err(err) => {
                warn!(repo = %self.repo, error = %err, "Initial load failed");
                self.phase = Phase::Failed(err);
            }
        }
        Outcome::Applied
    }

    /// Apply the result of a filter or page reload
    pub fn finish_reload(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Issue>, FetchError>,
    ) -> Outcome {
        if !self.accepts(&ticket, TicketKind::Reload) {
            debug!(
                seq = ticket.seq,
                state = %ticket.query.state,
                page = ticket.query.page,
                "Discarding stale issue page"
            );
            return Outcome::Discarded;
        }

        match result {
            Ok(issues) => {
                info!(
                    state = %ticket.query.state,
                    page = ticket.query.page,
                    issues = issues.len(),
                    "Issue page loaded"
                );
                self.replace_issues(issues);
                self.reload_error = None;
            }
            Err(err) => {
                warn!(error = %err, "Issue reload failed");
                self.reload_error = Some(err);
            }
        }
        Outcome::Applied
    }

    fn replace_issues(&mut self, mut issues: Vec<Issue>) {
        issues.truncate(PER_PAGE as usize);
        self.issues = issues;
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> Snapshot<'_> {
        let (status, error) = match (&self.phase, &self.reload_error) {
            (Phase::Loading, _) => ("loading", None),
            (Phase::Failed(err), _) => ("failed", Some(err)),
            (Phase::Ready, err) => ("ready", err.as_ref()),
        };

        Snapshot {
            repo: self.repo.to_string(),
            status,
            error: error.map(|e| SnapshotError {
                kind: e.kind(),
                status: e.status(),
                message: e.to_string(),
            }),
            repository: self.repository.as_ref(),
            filter: self.view.filter(),
            filters: IssueFilter::ALL
                .iter()
                .map(|f| FilterButton {
                    filter: *f,
                    active: self.view.is_active(*f),
                })
                .collect(),
            page: self.view.page(),
            has_previous: self.view.can_go_previous(),
            has_next: self.view.can_go_next(),
            issues: &self.issues,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub repo: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SnapshotError>,
    pub repository: Option<&'a Repository>,
    pub filter: IssueFilter,
    pub filters: Vec<FilterButton>,
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub issues: &'a [Issue],
}

#[derive(Debug, Serialize)]
pub struct SnapshotError {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FilterButton {
    pub filter: IssueFilter,
    pub active: bool,
}

//! View state and the transition function that turns user actions into fetches

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issues requested per page
pub const PER_PAGE: u32 = 5;

/// Issue state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueFilter {
    All,
    #[default]
    Open,
    Closed,
}

impl IssueFilter {
    /// All filters in display order
    pub const ALL: [IssueFilter; 3] = [IssueFilter::All, IssueFilter::Open, IssueFilter::Closed];

    /// Value of the `state` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueFilter::All => "all",
            IssueFilter::Open => "open",
            IssueFilter::Closed => "closed",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            IssueFilter::All => "All",
            IssueFilter::Open => "Open",
            IssueFilter::Closed => "Closed",
        }
    }
}

impl fmt::Display for IssueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(IssueFilter::All),
            "open" => Ok(IssueFilter::Open),
            "closed" => Ok(IssueFilter::Closed),
            other => Err(format!(
                "unknown filter '{}': expected all, open or closed",
                other
            )),
        }
    }
}

/// Parameters of one issue-page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    pub state: IssueFilter,
    pub per_page: u32,
    pub page: u32,
}

impl IssueQuery {
    /// The query issued on first load: open issues, page 1
    pub fn initial() -> Self {
        ViewState::default().query()
    }
}

/// User actions that can change the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    SelectFilter(IssueFilter),
    NextPage,
    PreviousPage,
}

/// Filter and page currently shown. Only built through `new` or `default`,
/// so `page` is never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    filter: IssueFilter,
    page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: IssueFilter::Open,
            page: 1,
        }
    }
}

impl ViewState {
    /// Pages below 1 are clamped to 1
    pub fn new(filter: IssueFilter, page: u32) -> Self {
        Self {
            filter,
            page: page.max(1),
        }
    }

    pub fn filter(&self) -> IssueFilter {
        self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the given filter button is the active one
    pub fn is_active(&self, filter: IssueFilter) -> bool {
        self.filter == filter
    }

    pub fn can_go_previous(&self) -> bool {
        self.page >= 2
    }

    /// The API reports no total, so there is always a next page to ask for
    pub fn can_go_next(&self) -> bool {
        true
    }

    /// Fetch parameters for the current state
    pub fn query(&self) -> IssueQuery {
        IssueQuery {
            state: self.filter,
            per_page: PER_PAGE,
            page: self.page,
        }
    }

    /// Apply a command and return the query to issue, if the state changed.
    ///
    /// Selecting a filter always resets to page 1 and always reloads, even
    /// when the filter is already active. `PreviousPage` on page 1 is disabled
    /// and returns `None`.
    pub fn apply(&mut self, command: ViewCommand) -> Option<IssueQuery> {
        match command {
            ViewCommand::SelectFilter(filter) => {
                self.filter = filter;
                self.page = 1;
            }
            ViewCommand::NextPage => {
                self.page = self.page.saturating_add(1);
            }
            ViewCommand::PreviousPage => {
                if !self.can_go_previous() {
                    return None;
                }
                self.page -= 1;
            }
        }
        Some(self.query())
    }
}

/// Hands out increasing request sequence numbers so late responses can be
/// recognized and dropped
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request; it supersedes every earlier one
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    #[cfg(test)]
    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_open_page_one() {
        let view = ViewState::default();
        assert_eq!(view.filter(), IssueFilter::Open);
        assert_eq!(view.page(), 1);
        assert_eq!(
            view.query(),
            IssueQuery {
                state: IssueFilter::Open,
                per_page: 5,
                page: 1
            }
        );
        assert_eq!(IssueQuery::initial(), view.query());
    }

    #[test]
    fn selecting_filter_resets_page() {
        let mut view = ViewState::new(IssueFilter::Open, 4);
        let query = view.apply(ViewCommand::SelectFilter(IssueFilter::Closed));
        assert_eq!(
            query,
            Some(IssueQuery {
                state: IssueFilter::Closed,
                per_page: PER_PAGE,
                page: 1
            })
        );
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn reselecting_active_filter_still_reloads() {
        let mut view = ViewState::new(IssueFilter::All, 3);
        let query = view.apply(ViewCommand::SelectFilter(IssueFilter::All)).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.state, IssueFilter::All);
    }

    #[test]
    fn previous_is_disabled_exactly_on_first_page() {
        for page in 1..=5 {
            let view = ViewState::new(IssueFilter::Open, page);
            assert_eq!(view.can_go_previous(), page > 1, "page {}", page);
            assert!(view.can_go_next(), "page {}", page);
        }
    }

    #[test]
    fn previous_on_first_page_is_noop() {
        let mut view = ViewState::default();
        assert_eq!(view.apply(ViewCommand::PreviousPage), None);
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn next_then_previous_moves_one_page_each() {
        let mut view = ViewState::default();
        assert_eq!(view.apply(ViewCommand::NextPage).unwrap().page, 2);
        assert_eq!(view.apply(ViewCommand::NextPage).unwrap().page, 3);
        assert_eq!(view.apply(ViewCommand::PreviousPage).unwrap().page, 2);
        assert_eq!(view.filter(), IssueFilter::Open);
    }

    #[test]
    fn closed_then_next_produces_two_queries() {
        let mut view = ViewState::default();
        let first = view
            .apply(ViewCommand::SelectFilter(IssueFilter::Closed))
            .unwrap();
        let second = view.apply(ViewCommand::NextPage).unwrap();
        assert_eq!((first.state, first.page), (IssueFilter::Closed, 1));
        assert_eq!((second.state, second.page), (IssueFilter::Closed, 2));
    }

    #[test]
    fn exactly_one_filter_is_active() {
        for filter in IssueFilter::ALL {
            let view = ViewState::new(filter, 1);
            let active: Vec<_> = IssueFilter::ALL
                .iter()
                .filter(|f| view.is_active(**f))
                .collect();
            assert_eq!(active, vec![&filter]);
        }
    }

    #[test]
    fn new_clamps_page_zero() {
        assert_eq!(ViewState::new(IssueFilter::All, 0).page(), 1);
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("Closed".parse::<IssueFilter>(), Ok(IssueFilter::Closed));
        assert_eq!(" all ".parse::<IssueFilter>(), Ok(IssueFilter::All));
        assert!("merged".parse::<IssueFilter>().is_err());
    }

    #[test]
    fn tracker_only_accepts_latest() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(tracker.latest(), second);
    }
}

pub mod error;
pub mod loader;
pub mod models;
pub mod page;
pub mod route;
pub mod traits;
pub mod view;

pub use error::{FetchError, Result};
pub use loader::{load_page, PageData};
pub use models::*;
pub use page::{Outcome, PageModel, Phase, Snapshot, Ticket, TicketKind};
pub use route::{RepoId, RepoIdError};
pub use traits::RepositorySource;
pub use view::{IssueFilter, IssueQuery, RequestTracker, ViewCommand, ViewState, PER_PAGE};

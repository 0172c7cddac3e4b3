use repoview_core::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for FetchError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => FetchError::Transport(e.to_string()),
            GitHubError::Parse(e) => FetchError::Malformed(e.to_string()),
            GitHubError::RepositoryNotFound(name) => FetchError::Status {
                status: 404,
                message: format!("Repository '{}' not found", name),
            },
            GitHubError::Api { status, message } => FetchError::Status { status, message },
        }
    }
}

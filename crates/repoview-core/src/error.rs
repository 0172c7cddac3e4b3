use thiserror::Error;

/// Ways a request against the repository source can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout, reset)
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Malformed(_) => "malformed",
        }
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

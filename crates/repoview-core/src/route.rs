//! Repository identifiers as they arrive from the route segment

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoIdError {
    #[error("Invalid percent-encoding in repository '{0}'")]
    Encoding(String),

    #[error("Invalid repository '{0}': expected 'owner/name' (e.g., facebook%2Freact)")]
    Shape(String),
}

/// A repository named by owner and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Decode a route segment such as `facebook%2Freact`.
    ///
    /// Already-decoded input (`facebook/react`) is accepted as well.
    pub fn from_route_segment(segment: &str) -> Result<Self, RepoIdError> {
        let decoded = urlencoding::decode(segment.trim())
            .map_err(|_| RepoIdError::Encoding(segment.to_string()))?;

        let mut parts = decoded.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if is_valid_part(owner) && is_valid_part(name) => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RepoIdError::Shape(decoded.into_owned())),
        }
    }

    /// Path of this repository below the API root (`/repos/owner/name`)
    pub fn api_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.name)
        )
    }

    /// The route segment form (`owner%2Fname`)
    pub fn to_route_segment(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.chars().any(char::is_whitespace)
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_route_segment(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_encoded_segment() {
        let id = RepoId::from_route_segment("facebook%2Freact").unwrap();
        assert_eq!(id.owner, "facebook");
        assert_eq!(id.name, "react");
        assert_eq!(id.to_string(), "facebook/react");
    }

    #[test]
    fn lowercase_escape_is_decoded_too() {
        let id = RepoId::from_route_segment("rust-lang%2frust").unwrap();
        assert_eq!(id.to_string(), "rust-lang/rust");
    }

    #[test]
    fn accepts_plain_owner_slash_name() {
        let id: RepoId = "tokio-rs/tokio".parse().unwrap();
        assert_eq!(id.owner, "tokio-rs");
        assert_eq!(id.name, "tokio");
    }

    #[test]
    fn route_segment_round_trips() {
        let id = RepoId::from_route_segment("facebook%2Freact").unwrap();
        assert_eq!(id.to_route_segment(), "facebook%2Freact");
    }

    #[test]
    fn api_path_contains_owner_and_name() {
        let id: RepoId = "facebook/react".parse().unwrap();
        assert_eq!(id.api_path(), "/repos/facebook/react");
    }

    #[test]
    fn rejects_missing_name() {
        assert_eq!(
            RepoId::from_route_segment("facebook"),
            Err(RepoIdError::Shape("facebook".to_string()))
        );
        assert!(RepoId::from_route_segment("facebook%2F").is_err());
        assert!(RepoId::from_route_segment("%2Freact").is_err());
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(RepoId::from_route_segment("a%2Fb%2Fc").is_err());
        assert!(RepoId::from_route_segment("../etc%2Fpasswd").is_err());
    }

    #[test]
    fn rejects_invalid_utf8_escape() {
        assert!(matches!(
            RepoId::from_route_segment("owner%2F%FF"),
            Err(RepoIdError::Encoding(_))
        ));
    }
}

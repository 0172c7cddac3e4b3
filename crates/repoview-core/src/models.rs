use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account that owns a repository or authored an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// Repository metadata shown in the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub owner: Owner,
}

/// Label attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
    /// Hex color WITHOUT `#` prefix (e.g., "d73a4a")
    pub color: Option<String>,
}

impl Label {
    /// Parse the label color into RGB components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.as_deref()?.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// One entry of an issue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Globally unique ID
    pub id: u64,
    /// Per-repository number (e.g., #42)
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: IssueState,
    /// Labels in the order the API returned them
    pub labels: Vec<Label>,
    /// Author
    pub user: Owner,
    pub comments: u64,
    pub created_at: Option<DateTime<Utc>>,
}

use serde::{Deserialize, Serialize};

/// GitHub label
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubLabel {
    pub id: u64,
    pub name: String,
    /// Color hex string WITHOUT `#` prefix (e.g., "fc2929")
    pub color: Option<String>,
    pub description: Option<String>,
}

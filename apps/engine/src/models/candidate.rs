use serde::{Deserialize, Serialize};

/// A candidate under evaluation. The engine only needs identity fields and
/// the extracted plain-text resume; file-format extraction happens upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "text")]
    pub resume_text: String,
}

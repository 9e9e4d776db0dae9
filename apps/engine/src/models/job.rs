use serde::{Deserialize, Serialize};

/// A job opening as handed to the engine by the hosting application.
///
/// Two requirement shapes coexist: the AI path reads the
/// `must_have_requirements` / `preferred_requirements` split, while the
/// rule-based screener reads the flat `requirements` list plus the optional
/// `education` and `licenses` strings. Callers populate whichever side they
/// have; every field is defaulted so partial payloads deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub summary: String,

    /// Must-have requirements, one free-text line each (AI path).
    #[serde(default)]
    pub must_have_requirements: Vec<String>,
    /// Preferred requirements (AI path).
    #[serde(default)]
    pub preferred_requirements: Vec<String>,

    /// Flat requirement list (rule-based path).
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Required education level, e.g. "Bachelor's degree in CS".
    #[serde(default)]
    pub education: Option<String>,
    /// Required licenses or certifications.
    #[serde(default)]
    pub licenses: Option<String>,
}

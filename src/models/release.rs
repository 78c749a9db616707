use serde::{Deserialize, Serialize};

/// An entry of `GET /release_stages/`
///
/// Only `name` and the two dates are shown in the list; the rest is kept
/// when the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseStage {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ReleaseStage {
    /// One-line summary: `name (start - end)`
    pub fn summary(&self) -> String {
        format!("{} ({} - {})", self.name, self.start_date, self.end_date)
    }
}

/// Fields of a release stage to create
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReleaseStage {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub responsible_person: String,
}

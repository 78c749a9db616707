use serde::{Deserialize, Serialize};

/// The signed-in user's profile, as returned by `GET /profile/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

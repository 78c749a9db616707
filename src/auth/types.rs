// Authentication types

use serde::Deserialize;
use serde_json::{Map, Value};

/// Login endpoint response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Anything else the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

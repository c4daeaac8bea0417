//! Login request and response

use serde::{Deserialize, Serialize};

use super::RecordKey;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user block of a login response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionUser {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub users: Option<SessionUser>,
    #[serde(default)]
    pub message: Option<String>,
}

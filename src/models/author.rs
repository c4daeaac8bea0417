//! Author model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, RecordKey};

/// Author as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Create author request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(custom(function = "not_blank", message = "Author name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Update author request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAuthor {
    #[validate(custom(function = "not_blank", message = "Author name cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

//! Publisher model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, RecordKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
}

/// Create or update publisher request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PublisherInput {
    #[validate(custom(function = "not_blank", message = "Publisher name is required"))]
    pub name: String,
}

//! Category model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, RecordKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
}

/// Create or update category request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(custom(function = "not_blank", message = "Category name is required"))]
    pub name: String,
}

/// Body of `POST /categories/bulk`
#[derive(Debug, Clone, Serialize)]
pub struct BulkCategories {
    pub categories: Vec<CategoryInput>,
}

impl BulkCategories {
    /// Build a bulk request, dropping blank names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| CategoryInput { name })
            .collect();
        Self { categories }
    }
}

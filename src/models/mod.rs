//! Data models for the admin console

pub mod auth;
pub mod author;
pub mod book;
pub mod category;
pub mod publisher;
pub mod query;
pub mod record;
pub mod user;

use serde::Serialize;
use validator::ValidationError;

// Re-export commonly used types
pub use auth::{LoginRequest, LoginResponse, SessionUser};
pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use book::{Book, BookFormValues, BookPayload};
pub use category::{BulkCategories, Category, CategoryInput};
pub use publisher::{Publisher, PublisherInput};
pub use query::ListQuery;
pub use record::{EmbeddedEntity, EntityRef, RecordKey, Relation};
pub use user::{CreateUser, Role, UpdateUser, User};

/// Canonical list response, whatever envelope the backend used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Total number of records, when the backend reports it
    pub total: Option<u64>,
    pub message: Option<String>,
}

impl<T> ListResponse<T> {
    /// Number of pages for the given page size
    pub fn total_pages(&self, limit: u32) -> u64 {
        let total = self.total.unwrap_or(self.items.len() as u64);
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit))
    }
}

/// Rejects empty or whitespace-only strings
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

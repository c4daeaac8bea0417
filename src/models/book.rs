//! Book model, submission payload and form values

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::record::{EntityRef, Relation};
use super::RecordKey;

/// Book as returned by the backend.
///
/// Relation fields are kept in whatever shape the backend used (embedded
/// objects or bare identifiers); see `services::reconciler` for the
/// conversion to identifier lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_id: Option<Relation>,
    #[serde(default)]
    pub category_id: Option<Relation>,
    #[serde(default)]
    pub publisher_id: Option<Relation>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Book {
    pub fn author_labels(&self) -> Vec<String> {
        self.author_id.as_ref().map(Relation::labels).unwrap_or_default()
    }

    pub fn category_labels(&self) -> Vec<String> {
        self.category_id.as_ref().map(Relation::labels).unwrap_or_default()
    }

    pub fn publisher_label(&self) -> Option<String> {
        self.publisher_id
            .as_ref()
            .and_then(|r| r.refs().iter().find_map(EntityRef::label))
    }
}

/// Create/update body of `POST /books` and `PUT /books/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author_id: Vec<String>,
    pub category_id: Vec<String>,
    pub publisher_id: String,
    pub year_published: i32,
    pub isbn: String,
    pub quantity: i64,
    pub price: f64,
}

/// Current values of a book form
#[derive(Debug, Clone, PartialEq)]
pub struct BookFormValues {
    pub title: String,
    pub author_ids: Vec<String>,
    pub category_ids: Vec<String>,
    pub publisher_id: String,
    pub year_published: i32,
    pub isbn: String,
    pub quantity: i64,
    pub price: f64,
}

impl Default for BookFormValues {
    /// Blank values of a create form
    fn default() -> Self {
        Self {
            title: String::new(),
            author_ids: Vec::new(),
            category_ids: Vec::new(),
            publisher_id: String::new(),
            year_published: Utc::now().year(),
            isbn: String::new(),
            quantity: 1,
            price: 0.0,
        }
    }
}

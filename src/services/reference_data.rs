//! Reference lists (authors, categories, publishers) for the book form.
//!
//! The three lists load concurrently and fail independently: a failed or
//! unreadable list becomes an empty list plus a load error, and the others
//! are unaffected.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::normalizer::normalize_list,
    error::AppResult,
    models::{Author, Category, ListQuery, Publisher, RecordKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Authors,
    Categories,
    Publishers,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Authors,
        ReferenceKind::Categories,
        ReferenceKind::Publishers,
    ];

    /// Key the backend uses for this list inside its envelope
    pub fn resource_key(&self) -> &'static str {
        match self {
            ReferenceKind::Authors => "authors",
            ReferenceKind::Categories => "categories",
            ReferenceKind::Publishers => "publishers",
        }
    }

    pub fn load_error_message(&self) -> &'static str {
        match self {
            ReferenceKind::Authors => "Could not load the author list",
            ReferenceKind::Categories => "Could not load the category list",
            ReferenceKind::Publishers => "Could not load the publisher list",
        }
    }

    /// Placeholder shown by an empty selector
    pub fn empty_label(&self) -> &'static str {
        match self {
            ReferenceKind::Authors => "no authors",
            ReferenceKind::Categories => "no categories",
            ReferenceKind::Publishers => "no publishers",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resource_key())
    }
}

/// Where reference lists come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Raw list response for one reference resource
    async fn fetch_reference(&self, kind: ReferenceKind, query: &ListQuery) -> AppResult<Value>;
}

/// Something a selector can offer: an identifier and a label
pub trait ReferenceItem {
    fn key(&self) -> &RecordKey;
    fn label(&self) -> &str;
}

impl ReferenceItem for Author {
    fn key(&self) -> &RecordKey {
        &self.key
    }
    fn label(&self) -> &str {
        &self.name
    }
}

impl ReferenceItem for Category {
    fn key(&self) -> &RecordKey {
        &self.key
    }
    fn label(&self) -> &str {
        &self.name
    }
}

impl ReferenceItem for Publisher {
    fn key(&self) -> &RecordKey {
        &self.key
    }
    fn label(&self) -> &str {
        &self.name
    }
}

/// One loaded reference list and its load error, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceList<T> {
    pub kind: ReferenceKind,
    pub items: Vec<T>,
    pub error: Option<String>,
}

impl<T: ReferenceItem> ReferenceList<T> {
    fn failed(kind: ReferenceKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            error: Some(kind.load_error_message().to_string()),
        }
    }

    /// `(id, label)` options for a selector, skipping records without an identifier
    pub fn options(&self) -> Vec<(String, String)> {
        self.items
            .iter()
            .filter_map(|item| {
                item.key()
                    .get()
                    .map(|id| (id.to_string(), item.label().to_string()))
            })
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.key().get() == Some(id))
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key().get() == Some(id))
            .map(ReferenceItem::label)
    }

    /// What a selector shows when the list is empty
    pub fn placeholder(&self) -> Option<&'static str> {
        self.items.is_empty().then(|| self.kind.empty_label())
    }
}

/// The three reference lists behind a book form
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub authors: ReferenceList<Author>,
    pub categories: ReferenceList<Category>,
    pub publishers: ReferenceList<Publisher>,
}

impl ReferenceData {
    pub fn empty() -> Self {
        Self {
            authors: ReferenceList {
                kind: ReferenceKind::Authors,
                items: Vec::new(),
                error: None,
            },
            categories: ReferenceList {
                kind: ReferenceKind::Categories,
                items: Vec::new(),
                error: None,
            },
            publishers: ReferenceList {
                kind: ReferenceKind::Publishers,
                items: Vec::new(),
                error: None,
            },
        }
    }

    /// Load errors of every list, in display order
    pub fn warnings(&self) -> Vec<String> {
        [
            &self.authors.error,
            &self.categories.error,
            &self.publishers.error,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    pub fn error_for(&self, kind: ReferenceKind) -> Option<&str> {
        match kind {
            ReferenceKind::Authors => self.authors.error.as_deref(),
            ReferenceKind::Categories => self.categories.error.as_deref(),
            ReferenceKind::Publishers => self.publishers.error.as_deref(),
        }
    }
}

/// Fetch the three reference lists concurrently
pub async fn load_reference_data(source: &dyn ReferenceSource, limit: u32) -> ReferenceData {
    let query = ListQuery::page(1, limit);

    let (authors, categories, publishers) = tokio::join!(
        load_list::<Author>(source, ReferenceKind::Authors, &query),
        load_list::<Category>(source, ReferenceKind::Categories, &query),
        load_list::<Publisher>(source, ReferenceKind::Publishers, &query),
    );

    ReferenceData {
        authors,
        categories,
        publishers,
    }
}

async fn load_list<T>(source: &dyn ReferenceSource, kind: ReferenceKind, query: &ListQuery) -> ReferenceList<T>
where
    T: DeserializeOwned + ReferenceItem,
{
    let response = match source.fetch_reference(kind, query).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", kind, e);
            return ReferenceList::failed(kind);
        }
    };

    match normalize_list::<T>(&response, kind.resource_key()) {
        Ok(list) => {
            tracing::debug!("Loaded {} {}", list.items.len(), kind);
            ReferenceList {
                kind,
                items: list.items,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Unusable {} response: {}", kind, e);
            ReferenceList::failed(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_partial_failure_keeps_other_lists() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_reference()
            .with(eq(ReferenceKind::Authors), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(json!([{"_id": "a1", "name": "Nam Cao"}])));
        source
            .expect_fetch_reference()
            .with(eq(ReferenceKind::Categories), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(json!({"data": {"categories": [{"_id": "c1", "name": "Tiểu thuyết"}]}})));
        source
            .expect_fetch_reference()
            .with(eq(ReferenceKind::Publishers), mockall::predicate::always())
            .times(1)
            .returning(|_, _| {
                Err(AppError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            });

        let data = load_reference_data(&source, 100).await;

        assert_eq!(data.authors.options(), vec![("a1".to_string(), "Nam Cao".to_string())]);
        assert_eq!(data.categories.items.len(), 1);
        assert!(data.publishers.items.is_empty());
        assert_eq!(data.publishers.placeholder(), Some("no publishers"));
        assert_eq!(data.warnings(), vec!["Could not load the publisher list".to_string()]);
        assert!(data.error_for(ReferenceKind::Authors).is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_shape_becomes_load_error() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_reference()
            .returning(|kind, _| match kind {
                ReferenceKind::Categories => Ok(json!({"data": {"categories": {"categories": []}}})),
                _ => Ok(json!({"data": []})),
            });

        let data = load_reference_data(&source, 100).await;

        assert!(data.authors.error.is_none());
        assert_eq!(data.authors.placeholder(), Some("no authors"));
        assert!(data.categories.items.is_empty());
        assert_eq!(
            data.categories.error.as_deref(),
            Some("Could not load the category list")
        );
    }

    #[tokio::test]
    async fn test_requests_first_page_with_limit() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_reference()
            .withf(|_, query| query.page == 1 && query.limit == 100)
            .times(3)
            .returning(|_, _| Ok(json!([])));

        let data = load_reference_data(&source, 100).await;
        assert!(data.warnings().is_empty());
    }

    #[test]
    fn test_label_lookup() {
        let list = ReferenceList {
            kind: ReferenceKind::Publishers,
            items: vec![Publisher {
                key: RecordKey::new("p1"),
                name: "Kim Đồng".into(),
            }],
            error: None,
        };
        assert!(list.contains("p1"));
        assert_eq!(list.label_of("p1"), Some("Kim Đồng"));
        assert!(list.placeholder().is_none());
    }
}

//! List query parameters shared by the listing endpoints

use serde::Serialize;

/// Query string of a list endpoint.
///
/// Authors, categories and publishers filter with `sortBy`/`searchBy`/`value`,
/// books with `search` and users with `keyword`. Unset fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            sort_by: None,
            search_by: None,
            value: None,
            search: None,
            keyword: None,
        }
    }

    /// Filter by a named field (`searchBy=<field>&value=<term>`); blank terms are ignored
    pub fn search_by(mut self, field: &str, term: Option<&str>) -> Self {
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            self.search_by = Some(field.to_string());
            self.value = Some(term.to_string());
        }
        self
    }

    pub fn sort_by(mut self, field: Option<&str>) -> Self {
        self.sort_by = field.map(str::to_string);
        self
    }

    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn keyword(mut self, term: Option<&str>) -> Self {
        self.keyword = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::page(1, 10)
    }
}

//! Book listing, deletion and the entry point to the book form

use std::sync::Arc;

use super::book_form::{BookForm, FormMode};
use crate::{
    api::Api,
    error::AppResult,
    models::{Book, ListQuery, ListResponse},
};

#[derive(Clone)]
pub struct CatalogService {
    api: Api,
    reference_limit: u32,
}

impl CatalogService {
    pub fn new(api: Api, reference_limit: u32) -> Self {
        Self {
            api,
            reference_limit,
        }
    }

    /// One page of books, optionally filtered by a search term
    pub async fn list_books(&self, page: u32, limit: u32, search: Option<&str>) -> AppResult<ListResponse<Book>> {
        let query = ListQuery::page(page, limit).search(search);
        self.api.books.list(&query).await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.api.books.get(id).await
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<Option<String>> {
        let message = self.api.books.delete(id).await?;
        tracing::info!("Book {} deleted", id);
        Ok(message)
    }

    /// Open a create form with reference data loaded
    pub async fn open_create_form(&self) -> AppResult<BookForm> {
        let form = BookForm::new(Arc::new(self.api.books.clone()), FormMode::Create);
        form.open(&self.api, self.reference_limit, None).await?;
        Ok(form)
    }

    /// Open an edit form; `initial` skips the detail fetch
    pub async fn open_edit_form(&self, id: &str, initial: Option<Book>) -> AppResult<BookForm> {
        let form = BookForm::new(
            Arc::new(self.api.books.clone()),
            FormMode::Update { id: id.to_string() },
        );
        form.open(&self.api, self.reference_limit, initial).await?;
        Ok(form)
    }
}

//! Conversion between a book's relation fields and the identifier lists a
//! form works with.

use crate::models::{Book, BookFormValues, BookPayload, EntityRef, Relation};

/// Identifiers of a multi-valued relation field. A missing field yields an
/// empty list; elements without an identifier are dropped.
pub fn relation_ids(relation: Option<&Relation>) -> Vec<String> {
    relation
        .map(|r| r.refs().iter().filter_map(EntityRef::id).collect())
        .unwrap_or_default()
}

/// Identifier of a single-valued relation field (publisher). A list uses its
/// first usable element; a missing field yields an empty string.
pub fn single_id(relation: Option<&Relation>) -> String {
    relation
        .and_then(|r| r.refs().iter().find_map(EntityRef::id))
        .unwrap_or_default()
}

/// Populate edit-form values from a book as returned by the backend
pub fn form_values_from_book(book: &Book) -> BookFormValues {
    let defaults = BookFormValues::default();

    BookFormValues {
        title: book.title.clone().unwrap_or_default(),
        author_ids: relation_ids(book.author_id.as_ref()),
        category_ids: relation_ids(book.category_id.as_ref()),
        publisher_id: single_id(book.publisher_id.as_ref()),
        year_published: book.year_published.unwrap_or(defaults.year_published),
        isbn: book.isbn.clone().unwrap_or_default(),
        quantity: book.quantity.unwrap_or(defaults.quantity),
        price: book.price.unwrap_or(defaults.price),
    }
}

/// Build the submission payload: trimmed text, blank identifiers dropped
pub fn payload_from_form(values: &BookFormValues) -> BookPayload {
    BookPayload {
        title: values.title.trim().to_string(),
        author_id: clean_ids(&values.author_ids),
        category_id: clean_ids(&values.category_ids),
        publisher_id: values.publisher_id.trim().to_string(),
        year_published: values.year_published,
        isbn: values.isbn.trim().to_string(),
        quantity: values.quantity,
        price: values.price,
    }
}

fn clean_ids(ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

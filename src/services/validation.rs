//! Book form validation.
//!
//! Rules are checked in a fixed order and the first failure is reported, so a
//! user sees one message at a time.

use chrono::{Datelike, Utc};

use crate::{error::AppError, models::BookFormValues};

pub const MIN_YEAR: i32 = 1000;
/// How far past the current year a publication year may be
pub const FUTURE_YEARS: i32 = 5;

/// Form field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Authors,
    Categories,
    Publisher,
    Isbn,
    Year,
    Price,
    Quantity,
}

impl BookField {
    pub fn name(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Authors => "author_id",
            BookField::Categories => "category_id",
            BookField::Publisher => "publisher_id",
            BookField::Isbn => "isbn",
            BookField::Year => "year_published",
            BookField::Price => "price",
            BookField::Quantity => "quantity",
        }
    }
}

/// First rule a form breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: BookField,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation(e.message)
    }
}

fn fail(field: BookField, message: impl Into<String>) -> Result<(), FieldError> {
    Err(FieldError {
        field,
        message: message.into(),
    })
}

/// Validate against the current calendar year
pub fn validate_book_form(values: &BookFormValues) -> Result<(), FieldError> {
    validate_book_form_at(values, Utc::now().year())
}

/// Validate with an explicit current year
pub fn validate_book_form_at(values: &BookFormValues, current_year: i32) -> Result<(), FieldError> {
    if values.title.trim().is_empty() {
        return fail(BookField::Title, "Title is required");
    }
    if !has_id(&values.author_ids) {
        return fail(BookField::Authors, "Select at least one author");
    }
    if !has_id(&values.category_ids) {
        return fail(BookField::Categories, "Select at least one category");
    }
    if values.publisher_id.trim().is_empty() {
        return fail(BookField::Publisher, "Select a publisher");
    }
    if values.isbn.trim().is_empty() {
        return fail(BookField::Isbn, "ISBN is required");
    }

    let max_year = current_year + FUTURE_YEARS;
    if values.year_published < MIN_YEAR {
        return fail(
            BookField::Year,
            format!("Publication year must be {} or later", MIN_YEAR),
        );
    }
    if values.year_published > max_year {
        return fail(
            BookField::Year,
            format!("Publication year cannot be after {}", max_year),
        );
    }

    if !values.price.is_finite() || values.price < 0.0 {
        return fail(BookField::Price, "Price cannot be negative");
    }
    if values.quantity < 0 {
        return fail(BookField::Quantity, "Quantity cannot be negative");
    }

    Ok(())
}

fn has_id(ids: &[String]) -> bool {
    ids.iter().any(|id| !id.trim().is_empty())
}

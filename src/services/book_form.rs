//! Book create/update form.
//!
//! A form goes `Closed → LoadingReferenceData → Ready → Submitting`, then back
//! to `Closed` on success or to `Ready` on failure. Values survive a failed
//! submit untouched, and a second submit while one is in flight is refused.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::{
    reconciler::{form_values_from_book, payload_from_form},
    reference_data::{load_reference_data, ReferenceData, ReferenceSource},
    validation::{validate_book_form_at, FieldError},
};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFormValues, BookPayload},
};

/// Backend operations the form needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookGateway: Send + Sync {
    async fn fetch_book(&self, id: &str) -> AppResult<Book>;
    async fn create_book(&self, payload: &BookPayload) -> AppResult<Option<Book>>;
    async fn update_book(&self, id: &str, payload: &BookPayload) -> AppResult<Option<Book>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update { id: String },
}

impl FormMode {
    pub fn is_update(&self) -> bool {
        matches!(self, FormMode::Update { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Closed,
    LoadingReferenceData,
    Ready,
    Submitting,
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub mode: FormMode,
    pub payload: BookPayload,
    /// The saved record, when the backend echoed it
    pub book: Option<Book>,
}

struct FormInner {
    state: FormState,
    values: BookFormValues,
    references: ReferenceData,
    last_error: Option<String>,
    /// Bumped on every open and close; late results from an older run are dropped
    generation: u64,
}

pub struct BookForm {
    gateway: Arc<dyn BookGateway>,
    mode: FormMode,
    current_year: i32,
    inner: Mutex<FormInner>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a submit returns, whichever way it returns
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BookForm {
    pub fn new(gateway: Arc<dyn BookGateway>, mode: FormMode) -> Self {
        Self {
            gateway,
            mode,
            current_year: Utc::now().year(),
            inner: Mutex::new(FormInner {
                state: FormState::Closed,
                values: BookFormValues::default(),
                references: ReferenceData::empty(),
                last_error: None,
                generation: 0,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Pin the year used for the publication-year bound
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the form: load reference lists and, in update mode, the book.
    ///
    /// `initial` skips the detail fetch when the caller already holds the
    /// record (e.g. from the listing). Reference load failures are recorded as
    /// warnings and never fail the open; a failed detail fetch does.
    pub async fn open(
        &self,
        source: &dyn ReferenceSource,
        reference_limit: u32,
        initial: Option<Book>,
    ) -> AppResult<()> {
        let generation = {
            let mut inner = self.lock();
            if inner.state != FormState::Closed {
                return Err(AppError::InvalidState("form is already open".to_string()));
            }
            inner.generation += 1;
            inner.state = FormState::LoadingReferenceData;
            inner.last_error = None;
            inner.values = BookFormValues {
                year_published: self.current_year,
                ..BookFormValues::default()
            };
            inner.generation
        };

        let detail = async {
            match (&self.mode, initial) {
                (FormMode::Create, _) => Ok(None),
                (FormMode::Update { .. }, Some(book)) => Ok(Some(book)),
                (FormMode::Update { id }, None) => self.gateway.fetch_book(id).await.map(Some),
            }
        };
        let (references, detail) = tokio::join!(load_reference_data(source, reference_limit), detail);

        let mut inner = self.lock();
        if inner.generation != generation || inner.state != FormState::LoadingReferenceData {
            tracing::debug!("Book form closed while loading; discarding results");
            return Ok(());
        }

        for warning in references.warnings() {
            tracing::warn!("{}", warning);
        }
        inner.references = references;

        match detail {
            Ok(Some(book)) => {
                inner.values = form_values_from_book(&book);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to load book for editing: {}", e);
                inner.state = FormState::Closed;
                return Err(e);
            }
        }

        inner.state = FormState::Ready;
        Ok(())
    }

    /// Close without submitting
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = FormState::Closed;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn values(&self) -> BookFormValues {
        self.lock().values.clone()
    }

    pub fn references(&self) -> ReferenceData {
        self.lock().references.clone()
    }

    /// Inline warnings for reference lists that failed to load
    pub fn warnings(&self) -> Vec<String> {
        self.lock().references.warnings()
    }

    /// Message of the last failed submit
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Whether the submit trigger should be disabled
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) || self.state() != FormState::Ready
    }

    /// Change field values; only a ready form is editable
    pub fn edit<F>(&self, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut BookFormValues),
    {
        let mut inner = self.lock();
        if inner.state != FormState::Ready {
            return Err(AppError::InvalidState(format!(
                "cannot edit a form in state {:?}",
                inner.state
            )));
        }
        f(&mut inner.values);
        Ok(())
    }

    /// Validate current values without submitting
    pub fn check(&self) -> Result<(), FieldError> {
        validate_book_form_at(&self.lock().values, self.current_year)
    }

    /// Validate, send to the backend, refresh the caller's list, close.
    ///
    /// `refresh` runs only after a successful write. Its failure is logged
    /// and does not reopen the form.
    pub async fn submit<F, Fut>(&self, refresh: F) -> AppResult<SubmitOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Ignoring submit: another submission is in flight");
            return Err(AppError::SubmissionInProgress);
        }
        let _in_flight = InFlight(&self.in_flight);

        let (payload, generation) = {
            let mut inner = self.lock();
            if inner.state != FormState::Ready {
                return Err(AppError::InvalidState(format!(
                    "cannot submit a form in state {:?}",
                    inner.state
                )));
            }
            validate_book_form_at(&inner.values, self.current_year)?;
            inner.state = FormState::Submitting;
            inner.last_error = None;
            (payload_from_form(&inner.values), inner.generation)
        };

        let result = match &self.mode {
            FormMode::Create => self.gateway.create_book(&payload).await,
            FormMode::Update { id } => self.gateway.update_book(id, &payload).await,
        };

        let book = match result {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!("Saving book failed: {}", e);
                let mut inner = self.lock();
                if inner.generation == generation && inner.state == FormState::Submitting {
                    inner.state = FormState::Ready;
                    inner.last_error = Some(e.to_string());
                }
                return Err(e);
            }
        };

        match &self.mode {
            FormMode::Create => tracing::info!("Book \"{}\" created", payload.title),
            FormMode::Update { id } => tracing::info!("Book {} updated", id),
        }

        if let Err(e) = refresh().await {
            tracing::warn!("Refreshing the book list failed: {}", e);
        }

        {
            let mut inner = self.lock();
            if inner.generation == generation && inner.state == FormState::Submitting {
                inner.generation += 1;
                inner.state = FormState::Closed;
            }
        }

        Ok(SubmitOutcome {
            mode: self.mode.clone(),
            payload,
            book,
        })
    }
}

//! Business logic services

pub mod auth;
pub mod authors;
pub mod book_form;
pub mod catalog;
pub mod categories;
pub mod publishers;
pub mod reconciler;
pub mod reference_data;
pub mod users;
pub mod validation;

use std::future::Future;

use validator::ValidationErrors;

use crate::{api::Api, config::ListingConfig, error::AppError, session::Session};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub categories: categories::CategoriesService,
    pub publishers: publishers::PublishersService,
    pub users: users::UsersService,
}

impl Services {
    pub fn new(api: Api, session: Session, listing: &ListingConfig) -> Self {
        Self {
            auth: auth::AuthService::new(api.auth.clone(), session),
            authors: authors::AuthorsService::new(api.authors.clone()),
            categories: categories::CategoriesService::new(api.categories.clone()),
            publishers: publishers::PublishersService::new(api.publishers.clone()),
            users: users::UsersService::new(api.users.clone()),
            catalog: catalog::CatalogService::new(api, listing.reference_limit),
        }
    }
}

/// First human-readable message of a `validator` failure
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            })
        })
        .unwrap_or_else(|| "Invalid input".to_string())
}

/// Outcome of deleting several records one after another
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, AppError)>,
}

impl DeleteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete each id in turn; a failure does not stop the remaining deletions
pub async fn delete_each<F, Fut, T>(ids: &[String], mut delete: F) -> DeleteReport
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut report = DeleteReport::default();
    for id in ids {
        match delete(id.clone()).await {
            Ok(_) => report.deleted.push(id.clone()),
            Err(e) => {
                tracing::warn!("Deleting {} failed: {}", id, e);
                report.failed.push((id.clone(), e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateAuthor;
    use validator::Validate;

    #[tokio::test]
    async fn test_delete_each_reports_failures_individually() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let report = delete_each(&ids, |id| async move {
            if id == "b" {
                Err(AppError::NotFound(format!("/authors {}", id)))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(report.deleted, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "b");
        assert!(!report.is_success());
    }

    #[test]
    fn test_validation_message_uses_field_message() {
        let author = CreateAuthor {
            name: " ".into(),
            phone: None,
            email: None,
        };
        let errors = author.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Author name is required");
    }
}

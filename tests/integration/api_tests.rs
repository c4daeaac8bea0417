//! Live backend integration tests
//!
//! These talk to a running backend. Set `API_BASE_URL`, `LIBRARY_ADMIN_EMAIL`
//! and `LIBRARY_ADMIN_PASSWORD`, then run with: cargo test -- --ignored

use std::sync::Arc;

use library_admin::{
    api::{Api, ApiClient},
    config::ApiConfig,
    models::{CategoryInput, ListQuery},
    services::reference_data::load_reference_data,
    session::{InMemorySession, Session, SessionData, SessionStore},
    AppConfig, AppError, AppState,
};

fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string())
}

fn credentials() -> (String, String) {
    (
        std::env::var("LIBRARY_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
        std::env::var("LIBRARY_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
    )
}

/// Helper to get a logged-in application state
async fn logged_in() -> AppState {
    let mut config = AppConfig::default();
    config.api.base_url = base_url();
    let state = AppState::new(config).expect("Failed to build state");

    let (email, password) = credentials();
    state
        .services
        .auth
        .login(&email, &password)
        .await
        .expect("Failed to log in");
    state
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_login() {
    let state = logged_in().await;

    assert!(state.session.is_authenticated());
    let user = state.services.auth.current_user().expect("No user in login response");
    assert_eq!(user.email, credentials().0);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let mut config = AppConfig::default();
    config.api.base_url = base_url();
    let state = AppState::new(config).unwrap();

    let result = state
        .services
        .auth
        .login(&credentials().0, "definitely-wrong")
        .await;

    assert!(result.is_err());
    assert!(!state.session.is_authenticated());
}

#[tokio::test]
#[ignore]
async fn test_requests_without_session_are_rejected_locally() {
    let session: Session = Arc::new(InMemorySession::new());
    let config = ApiConfig {
        base_url: base_url(),
        timeout_secs: 5,
    };
    let api = Api::new(ApiClient::new(&config, session).unwrap());

    let result = api.books.list(&ListQuery::default()).await;
    assert!(matches!(result, Err(AppError::Authentication(_))));
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let state = logged_in().await;

    let list = state
        .services
        .catalog
        .list_books(1, 5, None)
        .await
        .expect("Failed to list books");

    assert!(list.items.len() <= 5);
    if let Some(total) = list.total {
        assert!(total >= list.items.len() as u64);
    }
}

#[tokio::test]
#[ignore]
async fn test_load_reference_data() {
    let state = logged_in().await;

    let data = load_reference_data(&state.api, 100).await;
    assert!(data.warnings().is_empty(), "warnings: {:?}", data.warnings());
}

#[tokio::test]
#[ignore]
async fn test_category_lifecycle() {
    let state = logged_in().await;
    let categories = &state.services.categories;
    let name = format!("Integration {}", chrono::Utc::now().timestamp());

    let created = categories
        .create(&name)
        .await
        .expect("Failed to create category")
        .expect("Backend did not echo the category");
    let id = created.key.get().expect("Created category has no id").to_string();

    let renamed = format!("{} (renamed)", name);
    categories.rename(&id, &renamed).await.expect("Failed to rename");
    let fetched = categories.get(&id).await.expect("Failed to fetch");
    assert_eq!(fetched.name, renamed);

    categories.delete(&id).await.expect("Failed to delete");
    assert!(categories.get(&id).await.is_err());
}

#[tokio::test]
#[ignore]
async fn test_expired_token_is_an_authentication_error() {
    let state = logged_in().await;
    state.session.start(SessionData {
        access_token: "not-a-token".to_string(),
        refresh_token: None,
        user: None,
    });

    let result = state
        .api
        .categories
        .create(&CategoryInput {
            name: "never created".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Authentication(_))));
}

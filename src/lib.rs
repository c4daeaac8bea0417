//! Library Admin Console
//!
//! Administration client for a library backend: manages users, authors,
//! books, categories and publishers over the backend's REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::{Api, ApiClient};
use session::{InMemorySession, Session};

/// Application state shared by every command
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Session,
    pub api: Api,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state with a fresh in-memory session
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Self::with_session(config, Arc::new(InMemorySession::new()))
    }

    pub fn with_session(config: AppConfig, session: Session) -> AppResult<Self> {
        let client = ApiClient::new(&config.api, session.clone())?;
        let api = Api::new(client);
        let services = services::Services::new(api.clone(), session.clone(), &config.listing);

        Ok(Self {
            config: Arc::new(config),
            session,
            api,
            services: Arc::new(services),
        })
    }
}

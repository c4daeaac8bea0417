//! Session context holding the tokens obtained at login.
//!
//! The session is created once and injected into the API client; nothing reads
//! it through a global. `start` is called on login success and `clear` on
//! logout, and tests can substitute their own [`SessionStore`].

use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::SessionUser,
};

/// Tokens and identity of a logged-in administrator
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: Option<SessionUser>,
}

/// Storage seam for the current session
pub trait SessionStore: Send + Sync {
    fn current(&self) -> Option<SessionData>;
    fn start(&self, data: SessionData);
    fn clear(&self);

    fn access_token(&self) -> Option<String> {
        self.current().map(|s| s.access_token)
    }

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Guard for screens that need a logged-in session
    fn require_token(&self) -> AppResult<String> {
        self.access_token()
            .ok_or_else(|| AppError::Authentication("Not logged in".to_string()))
    }
}

/// Process-local session kept in memory
#[derive(Debug, Default)]
pub struct InMemorySession {
    inner: RwLock<Option<SessionData>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already holding an access token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(SessionData {
                access_token: token.into(),
                refresh_token: None,
                user: None,
            })),
        }
    }
}

impl SessionStore for InMemorySession {
    fn current(&self) -> Option<SessionData> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn start(&self, data: SessionData) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(data);
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Shared handle passed to everything that issues requests
pub type Session = Arc<dyn SessionStore>;

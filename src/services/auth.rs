//! Login and logout

use crate::{
    api::auth::AuthApi,
    error::{AppError, AppResult},
    models::{LoginRequest, SessionUser},
    session::{Session, SessionData},
};

#[derive(Clone)]
pub struct AuthService {
    api: AuthApi,
    session: Session,
}

impl AuthService {
    pub fn new(api: AuthApi, session: Session) -> Self {
        Self { api, session }
    }

    /// Log in and open the session. Returns the backend's greeting message.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<String>> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;

        if response.access_token.trim().is_empty() {
            return Err(AppError::Authentication(
                "Login response did not contain an access token".to_string(),
            ));
        }

        tracing::info!("Logged in as {}", email);
        self.session.start(SessionData {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: response.users,
        });

        Ok(response.message)
    }

    pub fn logout(&self) {
        tracing::info!("Logging out");
        self.session.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.current().and_then(|s| s.user)
    }
}

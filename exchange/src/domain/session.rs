//! Explicit authentication context owned by the application shell.
//!
//! [`AuthSession`] replaces any notion of a global "current user". It is
//! created once at start-up from the persisted session and threaded through
//! every call that needs to know who is acting.

use std::sync::Arc;

use tracing::{info, warn};

use super::auth::{LoginCredentials, Registration};
use super::error::DomainError;
use super::ports::{LoginService, SessionStore, SessionStoreError};
use super::user::{User, UserRole};

impl From<SessionStoreError> for DomainError {
    fn from(value: SessionStoreError) -> Self {
        Self::internal(value.to_string())
    }
}

/// The signed-in user plus the services that change who that is.
pub struct AuthSession {
    login_service: Arc<dyn LoginService>,
    store: Arc<dyn SessionStore>,
    current: Option<User>,
}

impl AuthSession {
    /// Rebuild the session from persistent storage.
    ///
    /// A stored record that cannot be decoded is discarded and the session
    /// starts signed out.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::InternalError`](super::ErrorCode::InternalError) when the
    /// store cannot be read or cleared.
    pub fn restore(
        login_service: Arc<dyn LoginService>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, DomainError> {
        let current = match store.load() {
            Ok(user) => user,
            Err(SessionStoreError::Corrupt { message }) => {
                warn!(%message, "discarding unreadable session");
                store.clear()?;
                None
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(user) = &current {
            info!(user_id = %user.id(), "session restored");
        }
        Ok(Self {
            login_service,
            store,
            current,
        })
    }

    /// Currently signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Signed-in user, or an `Unauthorized` error.
    pub fn require_user(&self) -> Result<&User, DomainError> {
        self.current
            .as_ref()
            .ok_or_else(|| DomainError::unauthorized("sign in first"))
    }

    /// Authenticate and persist the user.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for blank fields, `Unauthorized` when no account
    /// matches, `InternalError` when the session cannot be saved.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, DomainError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let user = self.login_service.login(&credentials).await?;
        Ok(self.remember(user)?)
    }

    /// Create an account, then sign in as it.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for invalid fields, `Conflict` when the email is
    /// taken, `InternalError` when the session cannot be saved.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<&User, DomainError> {
        let registration = Registration::try_from_parts(name, email, password, role)?;
        let user = self.login_service.register(&registration).await?;
        Ok(self.remember(user)?)
    }

    /// Sign out and forget the persisted user.
    pub fn logout(&mut self) -> Result<(), DomainError> {
        self.store.clear()?;
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id(), "signed out");
        }
        Ok(())
    }

    fn remember(&mut self, user: User) -> Result<&User, SessionStoreError> {
        self.store.save(&user)?;
        Ok(self.current.insert(user))
    }
}

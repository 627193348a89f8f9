//! Driving port for login and registration use-cases.
//!
//! The shell calls this port to turn credentials into a [`User`] without
//! knowing where accounts live. Tests substitute the generated mock or the
//! in-memory fixture service.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::{DomainError, LoginCredentials, Registration, User, UserId};

/// Avatar given to users who register through the exchange.
pub const DEFAULT_PROFILE_IMAGE: &str =
    "https://images.pexels.com/photos/1043471/pexels-photo-1043471.jpeg?auto=compress&cs=tinysrgb&w=150";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user, minus the password.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError>;

    /// Create an account and return the new user.
    async fn register(&self, registration: &Registration) -> Result<User, DomainError>;
}

/// Hex-encoded SHA-256 digest of `password`.
///
/// # Examples
/// ```
/// use exchange::domain::ports::password_digest;
///
/// assert_eq!(password_digest("password123"), example_data::DEMO_PASSWORD_SHA256);
/// ```
#[must_use]
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// A login account: a profile plus the digest of its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    user: User,
    password_sha256: String,
}

impl DemoAccount {
    /// Pair a profile with a lowercase hex SHA-256 password digest.
    #[must_use]
    pub fn new(user: User, password_sha256: impl Into<String>) -> Self {
        Self {
            user,
            password_sha256: password_sha256.into(),
        }
    }

    /// Profile returned on login.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    fn matches(&self, credentials: &LoginCredentials) -> bool {
        let email: &str = self.user.email().as_ref();
        email == credentials.email()
            && self.password_sha256 == password_digest(credentials.password())
    }
}

/// In-memory authenticator seeded with demo accounts.
///
/// Registered accounts live as long as the service. Every call waits for the
/// configured latency first to mimic a remote round trip.
#[derive(Debug, Default)]
pub struct FixtureLoginService {
    accounts: Mutex<Vec<DemoAccount>>,
    latency: Duration,
}

impl FixtureLoginService {
    /// Create a service over `accounts` with no artificial latency.
    #[must_use]
    pub fn new(accounts: Vec<DemoAccount>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&mut Vec<DemoAccount>) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| DomainError::internal("account store lock poisoned"))?;
        f(&mut accounts)
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        self.simulate_round_trip().await;
        let found = self.with_accounts(|accounts| {
            Ok(accounts
                .iter()
                .find(|account| account.matches(credentials))
                .map(|account| account.user.clone()))
        })?;
        match found {
            Some(user) => {
                info!(user_id = %user.id(), role = %user.role(), "login succeeded");
                Ok(user)
            }
            None => {
                warn!(email = credentials.email(), "login rejected");
                Err(DomainError::unauthorized("invalid email or password"))
            }
        }
    }

    async fn register(&self, registration: &Registration) -> Result<User, DomainError> {
        self.simulate_round_trip().await;
        let user = self.with_accounts(|accounts| {
            if accounts
                .iter()
                .any(|account| account.user.email() == registration.email())
            {
                warn!(email = %registration.email(), "registration rejected: email in use");
                return Err(DomainError::conflict("email already in use"));
            }
            let id = UserId::new((accounts.len() + 1).to_string())?;
            let user = User::new(
                id,
                registration.name().clone(),
                registration.email().clone(),
                registration.role(),
            )
            .with_profile_image(DEFAULT_PROFILE_IMAGE);
            accounts.push(DemoAccount::new(
                user.clone(),
                password_digest(registration.password()),
            ));
            Ok(user)
        })?;
        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }
}

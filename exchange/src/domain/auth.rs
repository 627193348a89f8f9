//! Authentication primitives: login credentials and registration requests.
//!
//! Inputs are validated here so the login service only ever sees well-formed
//! requests. Passwords are held in [`Zeroizing`] buffers and never logged.

use std::fmt;

use zeroize::Zeroizing;

use super::error::DomainError;
use super::user::{DisplayName, Email, UserRole, UserValidationError};

/// Domain error returned when login or registration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Registration requested a role users cannot sign up with.
    UnsupportedRole,
    /// A profile field failed validation.
    Profile(UserValidationError),
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UnsupportedRole => {
                write!(f, "role must be entrepreneur, investor, or developer")
            }
            Self::Profile(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<UserValidationError> for LoginValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Profile(value)
    }
}

impl LoginValidationError {
    /// Input field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
            Self::UnsupportedRole => "role",
            Self::Profile(inner) => inner.field(),
        }
    }
}

impl From<LoginValidationError> for DomainError {
    fn from(value: LoginValidationError) -> Self {
        Self::invalid_field(value.field(), value.to_string())
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, LoginValidationError> {
    if password.is_empty() {
        return Err(LoginValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. Its shape is not checked, so a
///   malformed address simply fails to match any account.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use exchange::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice@gmail.com", "password123")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "alice@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: require_password(password)?,
        })
    }

    /// Email used to look up the account.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
///
/// # Examples
/// ```
/// use exchange::domain::{Registration, UserRole};
///
/// let request = Registration::try_from_parts("Bruno", "bruno@gmail.com", "s3cret", UserRole::Developer)
///     .expect("valid registration");
/// assert_eq!(request.name().as_ref(), "Bruno");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
    role: UserRole,
}

impl Registration {
    /// Validate a sign-up request.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<Self, LoginValidationError> {
        if role == UserRole::Unknown {
            return Err(LoginValidationError::UnsupportedRole);
        }
        if email.trim().is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        Ok(Self {
            name: DisplayName::new(name)?,
            email: Email::new(email)?,
            password: require_password(password)?,
            role,
        })
    }

    /// Requested display name.
    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Requested login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }
}

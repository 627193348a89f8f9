//! User data model.
//!
//! Users are matched against ledger entries by display name, so the name is
//! kept exactly as supplied (after trimming) and compared case-sensitively.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The identifier carried leading or trailing whitespace.
    InvalidId,
    /// The display name was blank.
    EmptyDisplayName,
    /// The display name exceeded the maximum length.
    DisplayNameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// The email was blank.
    EmptyEmail,
    /// The email did not look like `local@domain.tld`.
    InvalidEmail,
    /// The role string named no known role.
    UnknownRole {
        /// The rejected input.
        role: String,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@example.com"),
            Self::UnknownRole { role } => write!(
                f,
                "unknown role '{role}'; expected entrepreneur, investor, or developer"
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl UserValidationError {
    /// Input field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyDisplayName | Self::DisplayNameTooLong { .. } => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::UnknownRole { .. } => "role",
        }
    }
}

impl From<UserValidationError> for DomainError {
    fn from(value: UserValidationError) -> Self {
        Self::invalid_field(value.field(), value.to_string())
    }
}

/// Stable user identifier.
///
/// Seeded and registered users receive sequential numeric identifiers, but
/// any non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable display name, also used as the ledger party name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    ///
    /// Surrounding whitespace is trimmed; accents and punctuation are kept.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address.
///
/// Emails are compared exactly as stored; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Marketplace role.
///
/// Unrecognised role strings deserialise to [`UserRole::Unknown`], which every
/// role-dependent computation treats as the neutral branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Publishes projects and receives investments and sales.
    Entrepreneur,
    /// Funds projects.
    Investor,
    /// Is paid for development work.
    Developer,
    /// Any role string the exchange does not know.
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Roles a user can register with.
    pub const KNOWN: [Self; 3] = [Self::Entrepreneur, Self::Investor, Self::Developer];

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entrepreneur => "entrepreneur",
            Self::Investor => "investor",
            Self::Developer => "developer",
            Self::Unknown => "unknown",
        }
    }

    /// Human readable role name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Entrepreneur => "Entrepreneur",
            Self::Investor => "Investor",
            Self::Developer => "Developer",
            Self::Unknown => "Unknown role",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    /// Parses one of the known roles; `unknown` is never accepted as input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| UserValidationError::UnknownRole { role: s.to_owned() })
    }
}

/// Marketplace user.
///
/// ## Invariants
/// - `id` is non-blank.
/// - `name` is non-empty once trimmed and at most [`DISPLAY_NAME_MAX`]
///   characters.
/// - `email` looks like an address.
///
/// # Examples
/// ```
/// use exchange::domain::{User, UserRole};
///
/// let user = User::try_from_strings("2", "Jean Martin", "jean@gmail.com", UserRole::Investor)
///     .expect("valid user");
/// assert_eq!(user.name().as_ref(), "Jean Martin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: Email,
    role: UserRole,
    profile_image: Option<String>,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, name: DisplayName, email: Email, role: UserRole) -> Self {
        Self {
            id,
            name,
            email,
            role,
            profile_image: None,
        }
    }

    /// Fallible constructor enforcing identifier, name, and email invariants.
    ///
    /// Prefer [`User::new`] when components are already validated.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            DisplayName::new(name)?,
            Email::new(email)?,
            role,
        ))
    }

    /// Attach an avatar URL.
    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image = Some(url.into());
        self
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name, matched against transaction parties.
    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Marketplace role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Optional avatar URL.
    #[must_use]
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            profile_image,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            profile_image,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let user = User::try_from_strings(value.id, value.name, value.email, value.role)?;
        Ok(match value.profile_image {
            Some(url) => user.with_profile_image(url),
            None => user,
        })
    }
}

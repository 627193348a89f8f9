//! Seed record types.
//!
//! These records describe the fixture ledger exactly as it is stored on disk.
//! They are independent of the exchange domain types to avoid circular
//! dependencies; the exchange converts them at load time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marketplace role of a seeded user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSeed {
    /// Publishes projects and receives investments and sales.
    Entrepreneur,
    /// Funds projects.
    Investor,
    /// Is paid for development work on projects.
    Developer,
}

/// A directory user record.
///
/// # Example
///
/// ```
/// use example_data::{RoleSeed, UserSeed};
///
/// let user = UserSeed {
///     id: "1".to_owned(),
///     name: "Alice Dupont".to_owned(),
///     email: "alice@gmail.com".to_owned(),
///     role: RoleSeed::Entrepreneur,
///     profile_image: None,
/// };
///
/// assert_eq!(user.role, RoleSeed::Entrepreneur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    /// Stable identifier.
    pub id: String,
    /// Display name used for name-based transaction matching.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Marketplace role.
    pub role: RoleSeed,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// A demo login account: a user profile plus a password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSeed {
    /// Profile returned after a successful login.
    #[serde(flatten)]
    pub user: UserSeed,
    /// Lowercase hex SHA-256 digest of the account password.
    pub password_sha256: String,
}

/// Lifecycle status of a seeded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatusSeed {
    /// Open for investment.
    Active,
    /// Awaiting review.
    Pending,
    /// Closed.
    Expired,
}

/// A seeded project (patent listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSeed {
    /// Stable identifier.
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: String,
    /// Category key (`tech`, `health`, `energy`, `transport`, ...).
    pub category: String,
    /// Identifier of the creating user.
    pub creator_id: String,
    /// Denormalised creator display name.
    pub creator_name: String,
    /// Lifecycle status.
    pub status: ProjectStatusSeed,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Cumulative invested amount.
    #[serde(default)]
    pub investment: Option<Decimal>,
    /// Number of investments received.
    #[serde(default)]
    pub investors: Option<u32>,
    /// Number of developers attached to the project.
    #[serde(default)]
    pub developers_count: Option<u32>,
}

/// Kind of a seeded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTypeSeed {
    /// Investor funding a project.
    Investment,
    /// Sale of a patent or product.
    Sale,
    /// Payment for development work.
    Development,
}

/// Settlement status of a seeded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatusSeed {
    /// Settled.
    Completed,
    /// Awaiting settlement.
    Pending,
    /// Rejected or reversed upstream.
    Failed,
}

/// A seeded ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSeed {
    /// Stable identifier.
    pub id: String,
    /// Referenced project.
    pub project_id: String,
    /// Denormalised project title.
    pub project_title: String,
    /// Non-negative amount in the implicit currency.
    pub amount: Decimal,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: TransactionTypeSeed,
    /// Settlement status.
    pub status: TransactionStatusSeed,
    /// Timestamp of the transaction.
    pub date: DateTime<Utc>,
    /// Paying party display name.
    pub from: String,
    /// Receiving party display name.
    pub to: String,
}

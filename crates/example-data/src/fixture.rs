//! Seed ledger fixture types and JSON parsing.
//!
//! The fixture holds the demo users, login accounts, projects, and
//! transactions the exchange boots from. It is loaded from JSON and checked
//! for referential consistency before use.

use std::collections::HashSet;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};

use crate::error::FixtureError;
use crate::seed::{AccountSeed, ProjectSeed, TransactionSeed, UserSeed};
use crate::validation::is_valid_password_digest;

/// Current supported fixture version.
const SUPPORTED_VERSION: u32 = 1;

/// Fixture bundled with the crate, mirroring the marketplace demo data.
const EMBEDDED_FIXTURE: &str = include_str!("../fixtures/marketplace.json");

/// A validated seed ledger.
///
/// # Example
///
/// ```
/// use example_data::SeedLedger;
///
/// let json = r#"{
///     "version": 1,
///     "users": [],
///     "accounts": [],
///     "projects": [],
///     "transactions": []
/// }"#;
///
/// let ledger = SeedLedger::from_json(json).expect("valid fixture");
/// assert!(ledger.projects().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLedger {
    version: u32,
    users: Vec<UserSeed>,
    accounts: Vec<AccountSeed>,
    projects: Vec<ProjectSeed>,
    transactions: Vec<TransactionSeed>,
}

impl SeedLedger {
    /// Parses a seed ledger from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if:
    /// - The JSON is malformed or misses required fields
    /// - The version is unsupported
    /// - Identifiers repeat within a collection
    /// - A transaction amount is negative or its project is unknown
    /// - An account email repeats or its password digest is malformed
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let raw: RawSeedLedger =
            serde_json::from_str(json).map_err(|e| FixtureError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed ledger from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, FixtureError> {
        let io_error = |message: String| FixtureError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("fixture path must be a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    /// Parses the fixture bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the bundled fixture fails validation.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_json(EMBEDDED_FIXTURE)
    }

    /// Assembles a ledger from already generated records, applying the same
    /// checks as [`SeedLedger::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the records are inconsistent.
    pub fn from_parts(
        users: Vec<UserSeed>,
        accounts: Vec<AccountSeed>,
        projects: Vec<ProjectSeed>,
        transactions: Vec<TransactionSeed>,
    ) -> Result<Self, FixtureError> {
        Self::from_raw(RawSeedLedger {
            version: SUPPORTED_VERSION,
            users,
            accounts,
            projects,
            transactions,
        })
    }

    /// Serialises the ledger back to pretty-printed fixture JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ParseError`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, FixtureError> {
        let raw = RawSeedLedger {
            version: self.version,
            users: self.users.clone(),
            accounts: self.accounts.clone(),
            projects: self.projects.clone(),
            transactions: self.transactions.clone(),
        };
        serde_json::to_string_pretty(&raw).map_err(|e| FixtureError::ParseError {
            message: e.to_string(),
        })
    }

    fn from_raw(raw: RawSeedLedger) -> Result<Self, FixtureError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(FixtureError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        ensure_unique_ids("users", raw.users.iter().map(|u| u.id.as_str()))?;
        ensure_unique_ids("projects", raw.projects.iter().map(|p| p.id.as_str()))?;
        ensure_unique_ids(
            "transactions",
            raw.transactions.iter().map(|t| t.id.as_str()),
        )?;

        let mut emails = HashSet::new();
        for account in &raw.accounts {
            if !emails.insert(account.user.email.as_str()) {
                return Err(FixtureError::DuplicateAccountEmail {
                    email: account.user.email.clone(),
                });
            }
            if !is_valid_password_digest(&account.password_sha256) {
                return Err(FixtureError::InvalidPasswordDigest {
                    email: account.user.email.clone(),
                });
            }
        }

        let project_ids: HashSet<&str> = raw.projects.iter().map(|p| p.id.as_str()).collect();
        for transaction in &raw.transactions {
            if transaction.amount.is_sign_negative() && !transaction.amount.is_zero() {
                return Err(FixtureError::NegativeAmount {
                    transaction_id: transaction.id.clone(),
                });
            }
            if !project_ids.contains(transaction.project_id.as_str()) {
                return Err(FixtureError::UnknownProject {
                    transaction_id: transaction.id.clone(),
                    project_id: transaction.project_id.clone(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            users: raw.users,
            accounts: raw.accounts,
            projects: raw.projects,
            transactions: raw.transactions,
        })
    }

    /// Returns the fixture version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the directory users.
    #[must_use]
    pub fn users(&self) -> &[UserSeed] {
        &self.users
    }

    /// Returns the demo login accounts.
    #[must_use]
    pub fn accounts(&self) -> &[AccountSeed] {
        &self.accounts
    }

    /// Returns the seeded projects.
    #[must_use]
    pub fn projects(&self) -> &[ProjectSeed] {
        &self.projects
    }

    /// Returns the seeded transactions in ledger order.
    #[must_use]
    pub fn transactions(&self) -> &[TransactionSeed] {
        &self.transactions
    }

    /// Finds a demo account by exact email.
    #[must_use]
    pub fn find_account(&self, email: &str) -> Option<&AccountSeed> {
        self.accounts.iter().find(|a| a.user.email == email)
    }
}

fn ensure_unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

/// Raw JSON representation for (de)serialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedLedger {
    version: u32,
    #[serde(default)]
    users: Vec<UserSeed>,
    #[serde(default)]
    accounts: Vec<AccountSeed>,
    #[serde(default)]
    projects: Vec<ProjectSeed>,
    #[serde(default)]
    transactions: Vec<TransactionSeed>,
}

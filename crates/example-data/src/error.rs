//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for fixture parsing and ledger
//! generation, following the project's error handling conventions with
//! `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a seed ledger fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture file at '{path}': {message}")]
    IoError {
        /// Path to the fixture file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The fixture JSON is malformed or missing required fields.
    #[error("invalid fixture JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The fixture version is not supported.
    #[error("unsupported fixture version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the fixture.
        actual: u32,
    },

    /// Two records in the same collection share an identifier.
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId {
        /// Collection holding the duplicate (`users`, `projects`, ...).
        collection: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// A transaction carries a negative amount.
    #[error("transaction '{transaction_id}' has a negative amount")]
    NegativeAmount {
        /// Identifier of the offending transaction.
        transaction_id: String,
    },

    /// A transaction references a project that is not in the fixture.
    #[error("transaction '{transaction_id}' references unknown project '{project_id}'")]
    UnknownProject {
        /// Identifier of the offending transaction.
        transaction_id: String,
        /// The missing project identifier.
        project_id: String,
    },

    /// Two demo accounts share an email address.
    #[error("duplicate account email '{email}'")]
    DuplicateAccountEmail {
        /// The repeated email address.
        email: String,
    },

    /// An account password digest is not a lowercase SHA-256 hex string.
    #[error("account '{email}' has an invalid password digest")]
    InvalidPasswordDigest {
        /// Email of the offending account.
        email: String,
    },
}

/// Errors that can occur during ledger generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a unique display name after maximum retries.
    #[error("failed to generate unique display name after {max_attempts} attempts")]
    DisplayNameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// Failed to generate a long enough project description.
    #[error("failed to generate project description after {max_attempts} attempts")]
    DescriptionGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// Projects or transactions were requested without one user per role.
    #[error("ledger generation needs at least {required} users, got {actual}")]
    NotEnoughUsers {
        /// Minimum number of users required.
        required: usize,
        /// Number of users requested.
        actual: usize,
    },

    /// The generation epoch could not be represented.
    #[error("generation epoch is out of range")]
    EpochOutOfRange,

    /// The generated records failed fixture validation.
    #[error("generated ledger is inconsistent: {0}")]
    InvalidLedger(#[from] FixtureError),
}

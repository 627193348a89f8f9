//! Seed ledger fixtures and deterministic ledger generation for the patent
//! exchange.
//!
//! This crate loads the demo marketplace ledger (users, login accounts,
//! projects, and transactions) from JSON and generates reproducible ledgers
//! for demos and tests. It is independent of the exchange domain types to
//! avoid circular dependencies.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading and validating seed ledgers from JSON strings or files
//! - A bundled fixture mirroring the marketplace demo data
//! - Deterministic ledger generation from a numeric seed
//! - Validation rules shared with the exchange domain
//!
//! # Example
//!
//! ```
//! use example_data::SeedLedger;
//!
//! let ledger = SeedLedger::embedded().expect("bundled fixture is valid");
//! let account = ledger.find_account("alice@gmail.com").expect("demo account");
//!
//! assert_eq!(account.user.name, "Alice");
//! assert_eq!(ledger.projects().len(), 8);
//! ```

mod error;
mod fixture;
mod generator;
mod seed;
mod validation;

pub use error::{FixtureError, GenerationError};
pub use fixture::SeedLedger;
pub use generator::{DEMO_PASSWORD_SHA256, GeneratorConfig, generate_example_ledger};
pub use seed::{
    AccountSeed, ProjectSeed, ProjectStatusSeed, RoleSeed, TransactionSeed, TransactionStatusSeed,
    TransactionTypeSeed, UserSeed,
};
pub use validation::{
    PROJECT_DESCRIPTION_MIN, is_valid_password_digest, is_valid_project_description,
};

//! Domain primitives, the ledger store, and the aggregator.
//!
//! Purpose: hold the exchange's business rules free of I/O. The ledger store
//! owns projects, transactions, and directory users; the aggregator modules
//! (`statistics`, `transaction_view`, `directory`, `dashboard`) are pure
//! functions over borrowed slices; `session` threads the signed-in user
//! through the shell explicitly.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode`: transport-agnostic failures.
//! - `User`, `Project`, `Transaction`, `Amount`: validated entities.
//! - `LedgerStore`: in-memory collections plus the two mutations.
//! - `compute_user_statistics`, `filter_and_sort_transactions`,
//!   `classify_transaction_direction`: the role-aware views.
//! - `AuthSession`: login, registration, and logout over the ports.

pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod ledger_store;
pub mod ports;
pub mod project;
pub mod session;
pub mod statistics;
pub mod transaction;
pub mod transaction_view;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::auth::{LoginCredentials, LoginValidationError, Registration};
pub use self::dashboard::{Dashboard, RECENT_ACTIVITY_LEN, compose_dashboard};
pub use self::directory::{
    CategoryFilter, RoleCounts, RoleFilter, count_roles, filter_users, search_projects,
};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::ledger_store::LedgerStore;
pub use self::project::{
    PROJECT_DESCRIPTION_MIN, Project, ProjectCategory, ProjectDraft, ProjectId, ProjectStatus,
    ProjectValidationError,
};
pub use self::session::AuthSession;
pub use self::statistics::{
    StatEntry, StatFormat, UserStatistics, compute_user_statistics, role_projects,
    role_transactions,
};
pub use self::transaction::{
    Amount, AmountError, Transaction, TransactionId, TransactionStatus, TransactionType,
};
pub use self::transaction_view::{
    Direction, InvestmentReconciliation, SortDirection, SortKey, TransactionSummary, TypeFilter,
    ViewOptionError, classify_transaction_direction, counterparty, filter_and_sort_transactions,
    project_transactions, reconcile_investment, summarize_transactions,
};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, Email, User, UserId, UserRole, UserValidationError};

/// Result alias for domain operations.
///
/// # Examples
/// ```
/// use exchange::domain::{DomainError, DomainResult};
///
/// fn guard() -> DomainResult<()> {
///     Err(DomainError::forbidden("only entrepreneurs can list projects"))
/// }
/// assert!(guard().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;

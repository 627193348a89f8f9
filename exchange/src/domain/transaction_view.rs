//! Filtered and sorted views over the ledger.
//!
//! Everything here is a pure function of its inputs. Callers keep ownership
//! of the ledger; views hand back new vectors or plain summaries.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::project::Project;
use super::transaction::{Amount, Transaction, TransactionType};
use super::user::UserRole;

/// Errors raised when parsing view options from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOptionError {
    /// The type filter named no transaction type.
    UnknownTypeFilter {
        /// The rejected input.
        value: String,
    },
    /// The sort key was neither `date` nor `amount`.
    UnknownSortKey {
        /// The rejected input.
        value: String,
    },
    /// The direction was neither `asc` nor `desc`.
    UnknownSortDirection {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for ViewOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTypeFilter { value } => write!(
                f,
                "unknown type filter '{value}'; expected all, investment, sale, or development"
            ),
            Self::UnknownSortKey { value } => {
                write!(f, "unknown sort key '{value}'; expected date or amount")
            }
            Self::UnknownSortDirection { value } => {
                write!(f, "unknown sort direction '{value}'; expected asc or desc")
            }
        }
    }
}

impl std::error::Error for ViewOptionError {}

/// Which transaction types a view keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep one type only.
    Only(TransactionType),
}

impl TypeFilter {
    fn keeps(self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => transaction.kind == kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ViewOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value == "all" {
            return Ok(Self::All);
        }
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .map(Self::Only)
            .ok_or_else(|| ViewOptionError::UnknownTypeFilter {
                value: s.to_owned(),
            })
    }
}

/// Field a view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Transaction timestamp.
    #[default]
    Date,
    /// Transaction amount.
    Amount,
}

impl FromStr for SortKey {
    type Err = ViewOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            _ => Err(ViewOptionError::UnknownSortKey {
                value: s.to_owned(),
            }),
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest or oldest first.
    Asc,
    /// Largest or newest first.
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ViewOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ViewOptionError::UnknownSortDirection {
                value: s.to_owned(),
            }),
        }
    }
}

/// Filter by type, then stable-sort by `sort_key`.
///
/// Entries with equal keys keep their ledger order in both directions. The
/// input slice is left untouched.
///
/// # Examples
/// ```
/// use exchange::domain::{SortDirection, SortKey, TypeFilter, filter_and_sort_transactions};
///
/// let view = filter_and_sort_transactions(&[], TypeFilter::All, SortKey::Date, SortDirection::Desc);
/// assert!(view.is_empty());
/// ```
#[must_use]
pub fn filter_and_sort_transactions(
    transactions: &[Transaction],
    type_filter: TypeFilter,
    sort_key: SortKey,
    sort_direction: SortDirection,
) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| type_filter.keeps(transaction))
        .cloned()
        .collect();
    view.sort_by(|left, right| {
        let ordering = match sort_key {
            SortKey::Date => left.date.cmp(&right.date),
            SortKey::Amount => left.amount.cmp(&right.amount),
        };
        match sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    view
}

/// Flow of a transaction from the viewer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money flowing towards the viewer.
    Incoming,
    /// Money flowing away from the viewer.
    Outgoing,
    /// A transfer between the same named party.
    Neutral,
}

impl Direction {
    /// Short display form; neutral renders as `-`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
            Self::Neutral => "-",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `transaction` for a viewer with `role`.
///
/// A fixed decision table: self-transfers are neutral; entrepreneurs see
/// everything except investments as outgoing; investors see investments as
/// outgoing; everything else is incoming.
///
/// # Examples
/// ```
/// use exchange::domain::{Direction, Transaction, UserRole, classify_transaction_direction};
/// use serde_json::json;
///
/// let transfer: Transaction = serde_json::from_value(json!({
///     "id": "1", "projectId": "1", "projectTitle": "Drone", "amount": "10",
///     "type": "sale", "status": "completed", "date": "2025-03-25T14:00:00Z",
///     "from": "A", "to": "A"
/// }))
/// .expect("valid transaction");
/// assert_eq!(classify_transaction_direction(&transfer, UserRole::Entrepreneur), Direction::Neutral);
/// ```
#[must_use]
pub fn classify_transaction_direction(transaction: &Transaction, role: UserRole) -> Direction {
    if transaction.from == transaction.to {
        return Direction::Neutral;
    }
    let is_investment = transaction.kind == TransactionType::Investment;
    match role {
        UserRole::Entrepreneur if !is_investment => Direction::Outgoing,
        UserRole::Investor if is_investment => Direction::Outgoing,
        _ => Direction::Incoming,
    }
}

/// The party a viewer with `role` is interested in.
///
/// Entrepreneurs see who paid them; everyone else sees the payee.
#[must_use]
pub fn counterparty(transaction: &Transaction, role: UserRole) -> &str {
    match role {
        UserRole::Entrepreneur => transaction.from.as_str(),
        _ => transaction.to.as_str(),
    }
}

/// Totals over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Sum over every entry.
    pub total: Amount,
    /// Sum over investments.
    pub investments: Amount,
    /// Sum over sales.
    pub sales: Amount,
    /// Sum over development payments.
    pub development: Amount,
    /// Number of entries.
    pub count: usize,
}

/// Summarise `transactions` irrespective of status.
#[must_use]
pub fn summarize_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> TransactionSummary {
    transactions
        .into_iter()
        .fold(TransactionSummary::default(), |mut summary, transaction| {
            summary.total = summary.total + transaction.amount;
            match transaction.kind {
                TransactionType::Investment => {
                    summary.investments = summary.investments + transaction.amount;
                }
                TransactionType::Sale => summary.sales = summary.sales + transaction.amount,
                TransactionType::Development => {
                    summary.development = summary.development + transaction.amount;
                }
            }
            summary.count += 1;
            summary
        })
}

/// Ledger entries referencing `project`, in ledger order.
#[must_use]
pub fn project_transactions<'a>(
    project: &Project,
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.project_id == project.id)
        .collect()
}

/// Stored versus ledger-derived investment for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentReconciliation {
    /// The project's maintained counter.
    pub stored: Amount,
    /// Sum of the project's investment transactions.
    pub ledger: Amount,
}

impl InvestmentReconciliation {
    /// Whether the counter agrees with the ledger.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.stored == self.ledger
    }
}

/// Compare a project's stored investment total with its ledger entries.
///
/// Drift is reported, never corrected.
#[must_use]
pub fn reconcile_investment(
    project: &Project,
    transactions: &[Transaction],
) -> InvestmentReconciliation {
    let ledger = project_transactions(project, transactions)
        .into_iter()
        .filter(|transaction| transaction.kind == TransactionType::Investment)
        .map(|transaction| transaction.amount)
        .sum();
    InvestmentReconciliation {
        stored: project.investment,
        ledger,
    }
}

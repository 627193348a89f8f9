//! Role-based portfolio statistics.
//!
//! Each known role contributes a [`RoleStrategy`] to a static lookup table.
//! A strategy decides which ledger entries and projects belong to a user and
//! folds them into a fixed-shape [`UserStatistics`]. Roles without a strategy
//! fall through to the all-zero default, so every function here is total.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::project::{Project, ProjectId, ProjectStatus};
use super::transaction::{Amount, Transaction, TransactionStatus, TransactionType};
use super::user::{User, UserRole};

mod developer;
mod entrepreneur;
mod investor;


/// How a statistic value should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatFormat {
    /// A monetary amount.
    Currency,
    /// A plain count.
    Count,
}

/// One labelled sub-statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    /// Display label.
    pub label: &'static str,
    /// Numeric value; counts are whole numbers.
    pub value: Decimal,
    /// Rendering hint.
    pub format: StatFormat,
}

impl StatEntry {
    fn currency(label: &'static str, amount: Amount) -> Self {
        Self {
            label,
            value: amount.value(),
            format: StatFormat::Currency,
        }
    }

    fn count(label: &'static str, count: usize) -> Self {
        Self {
            label,
            value: Decimal::from(count),
            format: StatFormat::Count,
        }
    }
}

/// Headline figures plus labelled breakdown for one user.
///
/// The default value is what an unrecognised role receives: zero figures,
/// empty labels and no breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    /// Headline currency total.
    pub main_value: Amount,
    /// Label for [`Self::main_value`].
    pub main_label: &'static str,
    /// First headline count.
    pub secondary_value: usize,
    /// Label for [`Self::secondary_value`].
    pub secondary_label: &'static str,
    /// Second headline count.
    pub tertiary_value: usize,
    /// Label for [`Self::tertiary_value`].
    pub tertiary_label: &'static str,
    /// Labelled breakdown.
    pub stats: Vec<StatEntry>,
}

/// Statistics strategy for one role.
struct RoleStrategy {
    role: UserRole,
    owns_transaction: fn(&User, &Transaction) -> bool,
    scopes_project: fn(&User, &Project) -> bool,
    compute: fn(&User, &[Project], &[&Transaction]) -> UserStatistics,
}

static STRATEGIES: [RoleStrategy; 3] = [
    entrepreneur::STRATEGY,
    investor::STRATEGY,
    developer::STRATEGY,
];

fn strategy_for(role: UserRole) -> Option<&'static RoleStrategy> {
    STRATEGIES.iter().find(|strategy| strategy.role == role)
}

/// Compute the statistics panel for `user`.
///
/// # Examples
/// ```
/// use exchange::domain::{User, UserRole, compute_user_statistics};
///
/// let user = User::try_from_strings("2", "Jean", "jean@gmail.com", UserRole::Investor)
///     .expect("valid user");
/// let stats = compute_user_statistics(&user, &[], &[]);
/// assert!(stats.main_value.is_zero());
/// assert_eq!(stats.secondary_value, 0);
/// ```
pub fn compute_user_statistics(
    user: &User,
    projects: &[Project],
    transactions: &[Transaction],
) -> UserStatistics {
    let Some(strategy) = strategy_for(user.role()) else {
        return UserStatistics::default();
    };
    let owned: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| (strategy.owns_transaction)(user, transaction))
        .collect();
    (strategy.compute)(user, projects, &owned)
}

/// Ledger entries that belong to `user`, in ledger order.
///
/// Uses the same predicate as [`compute_user_statistics`].
pub fn role_transactions<'a>(user: &User, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
    strategy_for(user.role()).map_or_else(Vec::new, |strategy| {
        transactions
            .iter()
            .filter(|transaction| (strategy.owns_transaction)(user, transaction))
            .collect()
    })
}

/// Projects a user's dashboard shows, in listing order.
///
/// Entrepreneurs see their own listings; investors and developers see the
/// whole catalogue.
pub fn role_projects<'a>(user: &User, projects: &'a [Project]) -> Vec<&'a Project> {
    strategy_for(user.role()).map_or_else(Vec::new, |strategy| {
        projects
            .iter()
            .filter(|project| (strategy.scopes_project)(user, project))
            .collect()
    })
}

fn total(transactions: &[&Transaction]) -> Amount {
    transactions.iter().map(|transaction| transaction.amount).sum()
}

fn total_of(transactions: &[&Transaction], kind: TransactionType) -> Amount {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<BTreeSet<_>>().len()
}

fn distinct_projects(transactions: &[&Transaction]) -> usize {
    transactions
        .iter()
        .map(|transaction| &transaction.project_id)
        .collect::<BTreeSet<&ProjectId>>()
        .len()
}

fn with_status(transactions: &[&Transaction], status: TransactionStatus) -> usize {
    transactions
        .iter()
        .filter(|transaction| transaction.status == status)
        .count()
}

/// Entries whose referenced project currently has `status`.
///
/// Entries pointing at unknown projects never match.
fn on_projects_with_status(
    transactions: &[&Transaction],
    projects: &[Project],
    status: ProjectStatus,
) -> usize {
    transactions
        .iter()
        .filter(|transaction| {
            projects
                .iter()
                .find(|project| project.id == transaction.project_id)
                .is_some_and(|project| project.status == status)
        })
        .count()
}

fn all_projects(_: &User, _: &Project) -> bool {
    true
}

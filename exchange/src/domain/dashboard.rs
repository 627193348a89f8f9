//! Composition of a user's dashboard.

use serde::Serialize;

use super::project::Project;
use super::statistics::{UserStatistics, compute_user_statistics, role_projects, role_transactions};
use super::transaction::Transaction;
use super::transaction_view::{TransactionSummary, summarize_transactions};
use super::user::User;

/// Number of entries in the recent-activity feed.
pub const RECENT_ACTIVITY_LEN: usize = 5;

/// Everything a dashboard shows, borrowed from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard<'a> {
    /// Headline statistics.
    pub statistics: UserStatistics,
    /// Projects in the user's scope.
    pub projects: Vec<&'a Project>,
    /// The first [`RECENT_ACTIVITY_LEN`] role transactions in ledger order.
    pub recent_transactions: Vec<&'a Transaction>,
    /// Totals over every role transaction.
    pub summary: TransactionSummary,
}

/// Assemble the dashboard for `user`.
///
/// The activity feed follows ledger order rather than date order.
#[must_use]
pub fn compose_dashboard<'a>(
    user: &User,
    projects: &'a [Project],
    transactions: &'a [Transaction],
) -> Dashboard<'a> {
    let owned = role_transactions(user, transactions);
    Dashboard {
        statistics: compute_user_statistics(user, projects, transactions),
        projects: role_projects(user, projects),
        summary: summarize_transactions(owned.iter().copied()),
        recent_transactions: owned.into_iter().take(RECENT_ACTIVITY_LEN).collect(),
    }
}

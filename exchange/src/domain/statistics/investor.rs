//! Investors: capital they have put into projects.

use super::{
    RoleStrategy, StatEntry, UserStatistics, all_projects, distinct, distinct_projects,
    on_projects_with_status, total, with_status,
};
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::transaction::{Transaction, TransactionStatus, TransactionType};
use crate::domain::user::{User, UserRole};

pub(super) const STRATEGY: RoleStrategy = RoleStrategy {
    role: UserRole::Investor,
    owns_transaction: invests,
    scopes_project: all_projects,
    compute,
};

fn invests(user: &User, transaction: &Transaction) -> bool {
    transaction.from == user.name().as_str() && transaction.kind == TransactionType::Investment
}

fn compute(_: &User, projects: &[Project], owned: &[&Transaction]) -> UserStatistics {
    let invested = total(owned);
    let funded = distinct_projects(owned);

    UserStatistics {
        main_value: invested,
        main_label: "Total invested",
        secondary_value: owned.len(),
        secondary_label: "Investments",
        tertiary_value: funded,
        tertiary_label: "Projects funded",
        stats: vec![
            StatEntry::currency("Total invested", invested),
            StatEntry::count("Projects funded", funded),
            StatEntry::count(
                "Active investments",
                on_projects_with_status(owned, projects, ProjectStatus::Active),
            ),
            StatEntry::count(
                "Pending investments",
                with_status(owned, TransactionStatus::Pending),
            ),
            StatEntry::count(
                "Entrepreneurs backed",
                distinct(owned.iter().map(|transaction| transaction.to.as_str())),
            ),
        ],
    }
}

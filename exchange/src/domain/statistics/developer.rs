//! Developers: payments received for development work.

use super::{
    RoleStrategy, StatEntry, UserStatistics, all_projects, distinct, distinct_projects,
    on_projects_with_status, total, with_status,
};
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::transaction::{Transaction, TransactionStatus, TransactionType};
use crate::domain::user::{User, UserRole};

pub(super) const STRATEGY: RoleStrategy = RoleStrategy {
    role: UserRole::Developer,
    owns_transaction: is_paid,
    scopes_project: all_projects,
    compute,
};

fn is_paid(user: &User, transaction: &Transaction) -> bool {
    transaction.to == user.name().as_str() && transaction.kind == TransactionType::Development
}

fn compute(_: &User, projects: &[Project], owned: &[&Transaction]) -> UserStatistics {
    let earned = total(owned);
    let in_progress = distinct_projects(owned);

    UserStatistics {
        main_value: earned,
        main_label: "Total earned",
        secondary_value: in_progress,
        secondary_label: "Projects",
        tertiary_value: owned.len(),
        tertiary_label: "Contracts",
        stats: vec![
            StatEntry::currency("Total earned", earned),
            StatEntry::count("Projects in progress", in_progress),
            StatEntry::count(
                "Active contracts",
                on_projects_with_status(owned, projects, ProjectStatus::Active),
            ),
            StatEntry::count(
                "Pending payments",
                with_status(owned, TransactionStatus::Pending),
            ),
            StatEntry::count(
                "Clients",
                distinct(owned.iter().map(|transaction| transaction.from.as_str())),
            ),
        ],
    }
}

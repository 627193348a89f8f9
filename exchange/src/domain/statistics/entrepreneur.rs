//! Entrepreneurs: everything paid to them, split by transaction type.

use super::{RoleStrategy, StatEntry, UserStatistics, distinct, total, total_of};
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::transaction::{Transaction, TransactionType};
use crate::domain::user::{User, UserRole};

pub(super) const STRATEGY: RoleStrategy = RoleStrategy {
    role: UserRole::Entrepreneur,
    owns_transaction: receives,
    scopes_project: created,
    compute,
};

fn receives(user: &User, transaction: &Transaction) -> bool {
    transaction.to == user.name().as_str()
}

fn created(user: &User, project: &Project) -> bool {
    &project.creator_id == user.id()
}

fn compute(user: &User, projects: &[Project], owned: &[&Transaction]) -> UserStatistics {
    let own_projects: Vec<&Project> = projects
        .iter()
        .filter(|project| created(user, project))
        .collect();
    let count_status = |status: ProjectStatus| {
        own_projects
            .iter()
            .filter(|project| project.status == status)
            .count()
    };

    let investments = total_of(owned, TransactionType::Investment);
    let sales = total_of(owned, TransactionType::Sale);
    let development = total_of(owned, TransactionType::Development);
    let investors = distinct(
        owned
            .iter()
            .filter(|transaction| transaction.kind == TransactionType::Investment)
            .map(|transaction| transaction.from.as_str()),
    );

    UserStatistics {
        main_value: total(owned),
        main_label: "Total revenue",
        secondary_value: own_projects.len(),
        secondary_label: "Listed projects",
        tertiary_value: owned.len(),
        tertiary_label: "Transactions",
        stats: vec![
            StatEntry::currency("Investments received", investments),
            StatEntry::currency("Sales", sales),
            StatEntry::currency("Development received", development),
            StatEntry::count("Active projects", count_status(ProjectStatus::Active)),
            StatEntry::count("Pending projects", count_status(ProjectStatus::Pending)),
            StatEntry::count("Expired projects", count_status(ProjectStatus::Expired)),
            StatEntry::count("Unique investors", investors),
        ],
    }
}

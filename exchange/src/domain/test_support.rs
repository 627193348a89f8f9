//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Amount, Project, ProjectCategory, ProjectId, ProjectStatus, Transaction, TransactionId,
    TransactionStatus, TransactionType, User, UserId, UserRole,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn user(id: &str, name: &str, email: &str, role: UserRole) -> User {
    User::try_from_strings(id, name, email, role).expect("fixture user")
}

pub(crate) fn entrepreneur() -> User {
    user("1", "Alice Dupont", "alice@gmail.com", UserRole::Entrepreneur)
}

pub(crate) fn investor() -> User {
    user("2", "Jean Martin", "jean@gmail.com", UserRole::Investor)
}

pub(crate) fn developer() -> User {
    user("4", "Thomas Dubois", "thomas@gmail.com", UserRole::Developer)
}

pub(crate) fn stranger() -> User {
    user("9", "Zoé Inconnue", "zoe@gmail.com", UserRole::Unknown)
}

pub(crate) fn amount(raw: &str) -> Amount {
    raw.parse().expect("amount literal")
}

/// Active project with zeroed counters; tests adjust the public fields.
pub(crate) fn project(id: &str, creator_id: &str, creator_name: &str) -> Project {
    Project {
        id: ProjectId::new(id).expect("project id"),
        title: format!("Projet {id}"),
        description: "Description de test suffisamment longue pour un brevet fictif.".to_owned(),
        category: ProjectCategory::Tech,
        creator_id: UserId::new(creator_id).expect("creator id"),
        creator_name: creator_name.to_owned(),
        status: ProjectStatus::Active,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
        investment: Amount::ZERO,
        investors: 0,
        developers_count: 0,
    }
}

/// Completed transaction dated at the fixture timestamp.
pub(crate) fn transaction(
    id: &str,
    project_id: &str,
    raw_amount: &str,
    kind: TransactionType,
    from: &str,
    to: &str,
) -> Transaction {
    Transaction {
        id: TransactionId::from_seed(id),
        project_id: ProjectId::new(project_id).expect("project id"),
        project_title: format!("Projet {project_id}"),
        amount: amount(raw_amount),
        kind,
        status: TransactionStatus::Completed,
        date: fixture_timestamp(),
        from: from.to_owned(),
        to: to.to_owned(),
    }
}

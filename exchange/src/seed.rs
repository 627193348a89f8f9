//! Seed ledger conversion.
//!
//! Turns the raw records from `example_data` into validated domain values and
//! demo login accounts. Conversion fails on the first record that breaks a
//! domain invariant so a broken fixture never reaches the ledger store.

use camino::Utf8Path;
use example_data::{
    AccountSeed, FixtureError, ProjectSeed, ProjectStatusSeed, RoleSeed, SeedLedger,
    TransactionSeed, TransactionStatusSeed, TransactionTypeSeed, UserSeed,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::DemoAccount;
use crate::domain::{
    Amount, AmountError, DomainError, Project, ProjectCategory, ProjectId, ProjectStatus,
    ProjectValidationError, Transaction, TransactionId, TransactionStatus, TransactionType, User,
    UserId, UserRole, UserValidationError,
};

/// Errors raised while loading or converting a seed ledger.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The fixture could not be read or parsed.
    #[error("seed fixture error: {0}")]
    Fixture(#[from] FixtureError),
    /// A user or account record failed validation.
    #[error("seed user {id} is invalid: {source}")]
    User {
        /// Identifier of the offending record.
        id: String,
        /// Underlying validation failure.
        #[source]
        source: UserValidationError,
    },
    /// A project record failed validation.
    #[error("seed project {id} is invalid: {source}")]
    Project {
        /// Identifier of the offending record.
        id: String,
        /// Underlying validation failure.
        #[source]
        source: ProjectValidationError,
    },
    /// An amount in the fixture was negative.
    #[error("seed record {id} has an invalid amount: {source}")]
    Amount {
        /// Identifier of the offending record.
        id: String,
        /// Underlying validation failure.
        #[source]
        source: AmountError,
    },
}

impl From<SeedError> for DomainError {
    fn from(value: SeedError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Domain collections built from a seed ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeSeed {
    /// Listed projects, in fixture order.
    pub projects: Vec<Project>,
    /// Ledger entries, in fixture order.
    pub transactions: Vec<Transaction>,
    /// Directory users.
    pub users: Vec<User>,
    /// Demo login accounts.
    pub accounts: Vec<DemoAccount>,
}

impl ExchangeSeed {
    /// Load `path` when given, otherwise the bundled fixture, and convert it.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when the fixture cannot be read or a record
    /// fails domain validation.
    ///
    /// # Examples
    /// ```
    /// use exchange::seed::ExchangeSeed;
    ///
    /// let seed = ExchangeSeed::load(None).expect("bundled fixture converts");
    /// assert_eq!(seed.projects.len(), 8);
    /// assert_eq!(seed.accounts.len(), 3);
    /// ```
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, SeedError> {
        let ledger = match path {
            Some(path) => SeedLedger::from_file(path)?,
            None => SeedLedger::embedded()?,
        };
        let seed = Self::try_from(&ledger)?;
        info!(
            source = path.map_or("embedded", Utf8Path::as_str),
            projects = seed.projects.len(),
            transactions = seed.transactions.len(),
            users = seed.users.len(),
            "seed ledger loaded"
        );
        Ok(seed)
    }
}

impl TryFrom<&SeedLedger> for ExchangeSeed {
    type Error = SeedError;

    fn try_from(ledger: &SeedLedger) -> Result<Self, Self::Error> {
        Ok(Self {
            projects: ledger
                .projects()
                .iter()
                .map(convert_project)
                .collect::<Result<_, _>>()?,
            transactions: ledger
                .transactions()
                .iter()
                .map(convert_transaction)
                .collect::<Result<_, _>>()?,
            users: ledger
                .users()
                .iter()
                .map(convert_user)
                .collect::<Result<_, _>>()?,
            accounts: ledger
                .accounts()
                .iter()
                .map(convert_account)
                .collect::<Result<_, _>>()?,
        })
    }
}

fn convert_user(seed: &UserSeed) -> Result<User, SeedError> {
    let user = User::try_from_strings(
        &seed.id,
        seed.name.clone(),
        seed.email.clone(),
        map_role(seed.role),
    )
    .map_err(|source| SeedError::User {
        id: seed.id.clone(),
        source,
    })?;
    Ok(match &seed.profile_image {
        Some(url) => user.with_profile_image(url.clone()),
        None => user,
    })
}

fn convert_account(seed: &AccountSeed) -> Result<DemoAccount, SeedError> {
    let user = convert_user(&seed.user)?;
    Ok(DemoAccount::new(user, seed.password_sha256.clone()))
}

fn convert_project(seed: &ProjectSeed) -> Result<Project, SeedError> {
    let id = ProjectId::new(&seed.id).map_err(|source| SeedError::Project {
        id: seed.id.clone(),
        source,
    })?;
    let creator_id = UserId::new(&seed.creator_id).map_err(|source| SeedError::User {
        id: seed.creator_id.clone(),
        source,
    })?;
    let investment = Amount::new(seed.investment.unwrap_or(Decimal::ZERO)).map_err(|source| {
        SeedError::Amount {
            id: seed.id.clone(),
            source,
        }
    })?;
    Ok(Project {
        id,
        title: seed.title.clone(),
        description: seed.description.clone(),
        category: seed
            .category
            .parse()
            .unwrap_or(ProjectCategory::Other),
        creator_id,
        creator_name: seed.creator_name.clone(),
        status: map_project_status(seed.status),
        created_at: seed.created_at,
        updated_at: seed.updated_at,
        investment,
        investors: seed.investors.unwrap_or(0),
        developers_count: seed.developers_count.unwrap_or(0),
    })
}

fn convert_transaction(seed: &TransactionSeed) -> Result<Transaction, SeedError> {
    let project_id = ProjectId::new(&seed.project_id).map_err(|source| SeedError::Project {
        id: seed.project_id.clone(),
        source,
    })?;
    let amount = Amount::new(seed.amount).map_err(|source| SeedError::Amount {
        id: seed.id.clone(),
        source,
    })?;
    Ok(Transaction {
        id: TransactionId::from_seed(seed.id.clone()),
        project_id,
        project_title: seed.project_title.clone(),
        amount,
        kind: map_transaction_type(seed.kind),
        status: map_transaction_status(seed.status),
        date: seed.date,
        from: seed.from.clone(),
        to: seed.to.clone(),
    })
}

fn map_role(role: RoleSeed) -> UserRole {
    match role {
        RoleSeed::Entrepreneur => UserRole::Entrepreneur,
        RoleSeed::Investor => UserRole::Investor,
        RoleSeed::Developer => UserRole::Developer,
    }
}

fn map_project_status(status: ProjectStatusSeed) -> ProjectStatus {
    match status {
        ProjectStatusSeed::Active => ProjectStatus::Active,
        ProjectStatusSeed::Pending => ProjectStatus::Pending,
        ProjectStatusSeed::Expired => ProjectStatus::Expired,
    }
}

fn map_transaction_type(kind: TransactionTypeSeed) -> TransactionType {
    match kind {
        TransactionTypeSeed::Investment => TransactionType::Investment,
        TransactionTypeSeed::Sale => TransactionType::Sale,
        TransactionTypeSeed::Development => TransactionType::Development,
    }
}

fn map_transaction_status(status: TransactionStatusSeed) -> TransactionStatus {
    match status {
        TransactionStatusSeed::Completed => TransactionStatus::Completed,
        TransactionStatusSeed::Pending => TransactionStatus::Pending,
        TransactionStatusSeed::Failed => TransactionStatus::Failed,
    }
}

//! In-memory ledger of projects, transactions, and directory users.
//!
//! The store owns its collections for the lifetime of the process. Reads hand
//! out slices; the two mutating operations take `&mut self`, so the owner
//! serialises writes without any locking.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::error::DomainError;
use super::project::{Project, ProjectDraft, ProjectId, ProjectStatus};
use super::transaction::{
    Amount, Transaction, TransactionId, TransactionStatus, TransactionType,
};
use super::user::{User, UserRole};

/// Owner of the exchange's core collections.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use exchange::domain::{Amount, LedgerStore, ProjectId};
/// use mockable::DefaultClock;
///
/// let mut store = LedgerStore::new(Vec::new(), Vec::new(), Vec::new(), Arc::new(DefaultClock));
/// let missing = ProjectId::new("42").expect("project id");
/// let amount = "500".parse::<Amount>().expect("amount");
///
/// assert!(store.record_investment(&missing, amount, "Jean").is_err());
/// assert!(store.list_transactions().is_empty());
/// ```
pub struct LedgerStore {
    projects: Vec<Project>,
    transactions: Vec<Transaction>,
    users: Vec<User>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Create a store from seed collections, kept in the given order.
    #[must_use]
    pub fn new(
        projects: Vec<Project>,
        transactions: Vec<Transaction>,
        users: Vec<User>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            transactions,
            users,
            clock,
        }
    }

    /// Projects in listing order.
    #[must_use]
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Transactions in ledger order.
    #[must_use]
    pub fn list_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Directory users.
    #[must_use]
    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    /// Look up a project by identifier.
    #[must_use]
    pub fn find_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    /// Record an investment into a project.
    ///
    /// Appends a completed investment transaction paid by `investor_name` to
    /// the project's creator, then bumps the project's cumulative investment
    /// and investor count. Repeat investors are counted again.
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::InvalidRequest`](super::ErrorCode::InvalidRequest) when
    ///   `amount` is zero.
    /// - [`ErrorCode::NotFound`](super::ErrorCode::NotFound) when the project
    ///   does not exist.
    pub fn record_investment(
        &mut self,
        project_id: &ProjectId,
        amount: Amount,
        investor_name: &str,
    ) -> Result<Transaction, DomainError> {
        if amount.is_zero() {
            return Err(DomainError::invalid_request(
                "investment amount must be greater than zero",
            ));
        }

        let date = self.clock.utc();
        let id = TransactionId::sequential(self.transactions.len() + 1);
        let project = self
            .projects
            .iter_mut()
            .find(|project| &project.id == project_id)
            .ok_or_else(|| DomainError::not_found(format!("project {project_id} not found")))?;

        let transaction = Transaction {
            id,
            project_id: project.id.clone(),
            project_title: project.title.clone(),
            amount,
            kind: TransactionType::Investment,
            status: TransactionStatus::Completed,
            date,
            from: investor_name.to_owned(),
            to: project.creator_name.clone(),
        };
        project.investment = project.investment + amount;
        project.investors = project.investors.saturating_add(1);

        info!(
            project_id = %project.id,
            transaction_id = %transaction.id,
            amount = %amount,
            investor = investor_name,
            "investment recorded"
        );
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// List a new project on behalf of `creator`.
    ///
    /// New projects start pending with zero totals. The identifier is the
    /// next free sequential number.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Forbidden`](super::ErrorCode::Forbidden) when the creator
    /// is not an entrepreneur.
    pub fn create_project(
        &mut self,
        creator: &User,
        draft: ProjectDraft,
    ) -> Result<Project, DomainError> {
        if creator.role() != UserRole::Entrepreneur {
            return Err(DomainError::forbidden(
                "only entrepreneurs can list projects",
            ));
        }

        let id = self.next_project_id()?;
        let now = self.clock.utc();
        let project = Project {
            id,
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            category: draft.category(),
            creator_id: creator.id().clone(),
            creator_name: creator.name().to_string(),
            status: ProjectStatus::Pending,
            created_at: now,
            updated_at: now,
            investment: Amount::ZERO,
            investors: 0,
            developers_count: 0,
        };

        info!(project_id = %project.id, creator = %creator.name(), "project created");
        self.projects.push(project.clone());
        Ok(project)
    }

    fn next_project_id(&self) -> Result<ProjectId, DomainError> {
        let mut candidate = self.projects.len() + 1;
        loop {
            let id = ProjectId::new(candidate.to_string())
                .map_err(|err| DomainError::internal(format!("invalid project id: {err}")))?;
            if self.find_project(&id).is_none() {
                return Ok(id);
            }
            debug!(%id, "project id taken; trying the next one");
            candidate += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ProjectCategory;
    use crate::domain::test_support::{
        amount, entrepreneur, fixture_clock, fixture_timestamp, investor, project, transaction,
    };
    use rstest::{fixture, rstest};

    const DESCRIPTION: &str =
        "Un drone autonome capable de livrer des colis en zone urbaine dense.";

    #[fixture]
    fn store() -> LedgerStore {
        LedgerStore::new(
            vec![project("1", "1", "Alice Dupont"), project("2", "3", "Sophie Leblanc")],
            vec![transaction("1", "1", "15000", TransactionType::Investment, "Jean Martin", "Alice Dupont")],
            vec![entrepreneur(), investor()],
            fixture_clock(),
        )
    }

    fn project_id(raw: &str) -> ProjectId {
        ProjectId::new(raw).expect("project id literal")
    }

    #[rstest]
    fn record_investment_appends_completed_investment(mut store: LedgerStore) {
        let before = store.find_project(&project_id("1")).cloned().expect("project");

        let recorded = store
            .record_investment(&project_id("1"), amount("500"), "Jean")
            .expect("investment recorded");

        assert_eq!(store.list_transactions().len(), 2);
        assert_eq!(store.list_transactions().last(), Some(&recorded));
        assert_eq!(recorded.id.as_ref(), "2");
        assert_eq!(recorded.kind, TransactionType::Investment);
        assert_eq!(recorded.status, TransactionStatus::Completed);
        assert_eq!(recorded.amount, amount("500"));
        assert_eq!(recorded.from, "Jean");
        assert_eq!(recorded.to, before.creator_name);
        assert_eq!(recorded.project_title, before.title);
        assert_eq!(recorded.date, fixture_timestamp());

        let after = store.find_project(&project_id("1")).expect("project");
        assert_eq!(after.investment, before.investment + amount("500"));
        assert_eq!(after.investors, before.investors + 1);
    }

    #[rstest]
    fn repeat_investors_are_counted_twice(mut store: LedgerStore) {
        for _ in 0..2 {
            store
                .record_investment(&project_id("2"), amount("100"), "Jean")
                .expect("investment recorded");
        }
        let project = store.find_project(&project_id("2")).expect("project");
        assert_eq!(project.investors, 2);
        assert_eq!(project.investment, amount("200"));
    }

    #[rstest]
    fn zero_amount_is_rejected(mut store: LedgerStore) {
        let err = store
            .record_investment(&project_id("1"), Amount::ZERO, "Jean")
            .expect_err("zero amount");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(store.list_transactions().len(), 1);
    }

    #[rstest]
    fn unknown_project_is_not_found(mut store: LedgerStore) {
        let err = store
            .record_investment(&project_id("99"), amount("10"), "Jean")
            .expect_err("unknown project");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(store.list_transactions().len(), 1);
    }

    #[rstest]
    fn entrepreneurs_create_pending_projects(mut store: LedgerStore) {
        let draft = ProjectDraft::try_new("Drone", DESCRIPTION, ProjectCategory::Transport)
            .expect("draft");
        let created = store
            .create_project(&entrepreneur(), draft)
            .expect("project created");

        assert_eq!(created.id.as_ref(), "3");
        assert_eq!(created.status, ProjectStatus::Pending);
        assert_eq!(created.investment, Amount::ZERO);
        assert_eq!(created.investors, 0);
        assert_eq!(created.creator_name, "Alice Dupont");
        assert_eq!(created.created_at, fixture_timestamp());
        assert_eq!(store.list_projects().len(), 3);
    }

    #[rstest]
    fn project_ids_skip_taken_numbers() {
        let mut store = LedgerStore::new(
            vec![project("2", "1", "Alice Dupont")],
            Vec::new(),
            Vec::new(),
            fixture_clock(),
        );
        let draft = ProjectDraft::try_new("Drone", DESCRIPTION, ProjectCategory::Tech)
            .expect("draft");
        let created = store
            .create_project(&entrepreneur(), draft)
            .expect("project created");
        assert_eq!(created.id.as_ref(), "3");
    }

    #[rstest]
    fn non_entrepreneurs_cannot_create_projects(mut store: LedgerStore) {
        let draft = ProjectDraft::try_new("Drone", DESCRIPTION, ProjectCategory::Tech)
            .expect("draft");
        let err = store
            .create_project(&investor(), draft)
            .expect_err("investor cannot list");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(store.list_projects().len(), 2);
    }
}

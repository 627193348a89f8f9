//! Application shell wiring the ledger store to the signed-in session.
//!
//! [`ExchangeApp`] owns both halves exclusively, so every mutation goes
//! through `&mut self` and no locking is involved.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tracing::info;

use crate::config::ExchangeSettings;
use crate::domain::ports::{FixtureLoginService, LoginService, SessionStore};
use crate::domain::{
    Amount, AuthSession, CategoryFilter, Dashboard, DomainError, Direction, LedgerStore, Project,
    ProjectCategory, ProjectDraft, ProjectId, RoleCounts, RoleFilter, SortDirection, SortKey,
    Transaction, TypeFilter, User, UserRole, UserStatistics, classify_transaction_direction,
    compose_dashboard, compute_user_statistics, count_roles, filter_and_sort_transactions,
    filter_users, role_transactions, search_projects,
};
use crate::outbound::FileSessionStore;
use crate::seed::ExchangeSeed;

/// A transaction paired with how it reads from the viewer's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    /// The ledger entry.
    pub transaction: Transaction,
    /// Direction relative to the viewer's role.
    pub direction: Direction,
}

/// Ledger plus session, owned by the shell for its whole lifetime.
pub struct ExchangeApp {
    ledger: LedgerStore,
    session: AuthSession,
    investment_latency: Duration,
}

impl ExchangeApp {
    /// Assemble an app from already built parts.
    #[must_use]
    pub fn new(ledger: LedgerStore, session: AuthSession) -> Self {
        Self {
            ledger,
            session,
            investment_latency: Duration::ZERO,
        }
    }

    /// Delay every investment by `latency`.
    #[must_use]
    pub fn with_investment_latency(mut self, latency: Duration) -> Self {
        self.investment_latency = latency;
        self
    }

    /// Build the app from settings: seed ledger, demo accounts, and the
    /// session persisted under the configured directory.
    ///
    /// # Errors
    ///
    /// `InternalError` when the seed ledger cannot be loaded or the stored
    /// session cannot be read.
    pub fn bootstrap(settings: &ExchangeSettings) -> Result<Self, DomainError> {
        let seed = ExchangeSeed::load(settings.fixture_path())?;
        let login_service: Arc<dyn LoginService> = Arc::new(
            FixtureLoginService::new(seed.accounts).with_latency(settings.latency()),
        );
        let store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(settings.session_dir()));
        let session = AuthSession::restore(login_service, store)?;
        let ledger = LedgerStore::new(
            seed.projects,
            seed.transactions,
            seed.users,
            Arc::new(DefaultClock),
        );
        Ok(Self::new(ledger, session).with_investment_latency(settings.investment_latency()))
    }

    /// Read access to the ledger.
    #[must_use]
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Currently signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::login`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, DomainError> {
        self.session.login(email, password).await
    }

    /// Register and sign in as the new account.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::register`].
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<&User, DomainError> {
        self.session.register(name, email, password, role).await
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// `InternalError` when the stored session cannot be removed.
    pub fn logout(&mut self) -> Result<(), DomainError> {
        self.session.logout()
    }

    /// Statistics for the signed-in user.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in.
    pub fn statistics(&self) -> Result<UserStatistics, DomainError> {
        let user = self.session.require_user()?;
        Ok(compute_user_statistics(
            user,
            self.ledger.list_projects(),
            self.ledger.list_transactions(),
        ))
    }

    /// Dashboard for the signed-in user.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in.
    pub fn dashboard(&self) -> Result<Dashboard<'_>, DomainError> {
        let user = self.session.require_user()?;
        Ok(compose_dashboard(
            user,
            self.ledger.list_projects(),
            self.ledger.list_transactions(),
        ))
    }

    /// The signed-in user's transactions, filtered, sorted, and classified.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in.
    pub fn transactions(
        &self,
        type_filter: TypeFilter,
        sort_key: SortKey,
        sort_direction: SortDirection,
    ) -> Result<Vec<TransactionRow>, DomainError> {
        let user = self.session.require_user()?;
        let owned: Vec<Transaction> = role_transactions(user, self.ledger.list_transactions())
            .into_iter()
            .cloned()
            .collect();
        Ok(
            filter_and_sort_transactions(&owned, type_filter, sort_key, sort_direction)
                .into_iter()
                .map(|transaction| TransactionRow {
                    direction: classify_transaction_direction(&transaction, user.role()),
                    transaction,
                })
                .collect(),
        )
    }

    /// Public project catalogue search.
    #[must_use]
    pub fn projects(&self, term: &str, category: CategoryFilter) -> Vec<&Project> {
        search_projects(self.ledger.list_projects(), term, category)
    }

    /// Directory search plus per-role counts over the whole directory.
    #[must_use]
    pub fn users(&self, term: &str, role: RoleFilter) -> (Vec<&User>, RoleCounts) {
        let users = self.ledger.list_users();
        (filter_users(users, term, role), count_roles(users))
    }

    /// Invest `amount` in `project_id` as the signed-in user.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` when nobody is signed in.
    /// - `InvalidRequest` when the amount is unparsable or not positive.
    /// - `NotFound` when the project does not exist.
    pub async fn invest(
        &mut self,
        project_id: &str,
        amount: &str,
    ) -> Result<Transaction, DomainError> {
        let investor_name = self.session.require_user()?.name().as_str().to_owned();
        let project_id = ProjectId::new(project_id)?;
        let amount: Amount = amount.parse()?;
        if amount.is_zero() {
            return Err(DomainError::invalid_request(
                "investment amount must be greater than zero",
            ));
        }
        if self.ledger.find_project(&project_id).is_none() {
            return Err(DomainError::not_found(format!(
                "project {project_id} does not exist"
            )));
        }
        if !self.investment_latency.is_zero() {
            tokio::time::sleep(self.investment_latency).await;
        }
        self.ledger
            .record_investment(&project_id, amount, &investor_name)
    }

    /// List a new project as the signed-in entrepreneur.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` when nobody is signed in.
    /// - `InvalidRequest` when the title or description is invalid.
    /// - `Forbidden` when the user is not an entrepreneur.
    pub fn create_project(
        &mut self,
        title: &str,
        description: &str,
        category: ProjectCategory,
    ) -> Result<Project, DomainError> {
        let creator = self.session.require_user()?;
        let draft = ProjectDraft::try_new(title, description, category)?;
        let project = self.ledger.create_project(creator, draft)?;
        info!(project_id = %project.id, "project listed from the shell");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{DemoAccount, InMemorySessionStore, password_digest};
    use crate::domain::test_support::{
        amount, developer, entrepreneur, fixture_clock, investor, project, transaction,
    };
    use crate::domain::TransactionType;
    use rstest::{fixture, rstest};

    const DESCRIPTION: &str =
        "A membrane that pulls drinking water out of desert air without power.";

    fn ledger() -> LedgerStore {
        LedgerStore::new(
            vec![
                project("1", "1", "Alice Dupont"),
                project("2", "3", "Sophie Leblanc"),
            ],
            vec![
                transaction("1", "1", "15000", TransactionType::Investment, "Jean Martin", "Alice Dupont"),
                transaction("2", "2", "20000", TransactionType::Investment, "Jean Martin", "Sophie Leblanc"),
                transaction("3", "1", "5000", TransactionType::Sale, "Entreprise XYZ", "Alice Dupont"),
            ],
            vec![entrepreneur(), investor(), developer()],
            fixture_clock(),
        )
    }

    fn app_signed_in_as(user: Option<User>) -> ExchangeApp {
        let accounts = [entrepreneur(), investor(), developer()]
            .into_iter()
            .map(|user| DemoAccount::new(user, password_digest("password123")))
            .collect();
        let store = Arc::new(InMemorySessionStore::default());
        if let Some(user) = &user {
            store.save(user).expect("seed session");
        }
        let session =
            AuthSession::restore(Arc::new(FixtureLoginService::new(accounts)), store)
                .expect("restore");
        ExchangeApp::new(ledger(), session)
    }

    #[fixture]
    fn signed_out() -> ExchangeApp {
        app_signed_in_as(None)
    }

    #[rstest]
    fn views_require_a_user(signed_out: ExchangeApp) {
        let code = signed_out.statistics().err().map(|err| err.code());
        assert_eq!(code, Some(ErrorCode::Unauthorized));
        assert!(signed_out.dashboard().is_err());
        assert!(
            signed_out
                .transactions(TypeFilter::All, SortKey::Date, SortDirection::Desc)
                .is_err()
        );
    }

    #[rstest]
    fn public_views_work_signed_out(signed_out: ExchangeApp) {
        assert_eq!(signed_out.projects("", CategoryFilter::All).len(), 2);
        let (users, counts) = signed_out.users("jean", RoleFilter::All);
        assert_eq!(users.len(), 1);
        assert_eq!(counts.total, 3);
    }

    #[tokio::test]
    async fn login_then_statistics() {
        let mut app = app_signed_in_as(None);
        app.login("jean@gmail.com", "password123")
            .await
            .expect("login");

        let stats = app.statistics().expect("signed in");
        assert_eq!(stats.main_value, amount("35000"));
        assert_eq!(stats.secondary_value, 2);
    }

    #[rstest]
    fn transactions_are_scoped_and_classified() {
        let app = app_signed_in_as(Some(entrepreneur()));

        let rows = app
            .transactions(TypeFilter::All, SortKey::Amount, SortDirection::Desc)
            .expect("signed in");

        let ids: Vec<&str> = rows.iter().map(|row| row.transaction.id.as_ref()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(rows[0].direction, Direction::Incoming);
        assert_eq!(rows[1].direction, Direction::Outgoing);
    }

    #[tokio::test]
    async fn invest_records_under_the_users_name() {
        let mut app = app_signed_in_as(Some(investor()));

        let recorded = app.invest("2", "500").await.expect("invest");

        assert_eq!(recorded.from, "Jean Martin");
        assert_eq!(recorded.to, "Sophie Leblanc");
        let listing = app
            .ledger()
            .find_project(&ProjectId::new("2").expect("id"))
            .expect("project");
        assert_eq!(listing.investment, amount("500"));
        assert_eq!(listing.investors, 1);
    }

    #[rstest]
    #[case(None, "1", "500", ErrorCode::Unauthorized)]
    #[case(Some(investor()), "1", "abc", ErrorCode::InvalidRequest)]
    #[case(Some(investor()), "1", "0", ErrorCode::InvalidRequest)]
    #[case(Some(investor()), "1", "-5", ErrorCode::InvalidRequest)]
    #[case(Some(investor()), "404", "500", ErrorCode::NotFound)]
    #[tokio::test]
    async fn invest_rejections(
        #[case] user: Option<User>,
        #[case] project_id: &str,
        #[case] raw_amount: &str,
        #[case] expected: ErrorCode,
    ) {
        let mut app = app_signed_in_as(user);

        let err = app
            .invest(project_id, raw_amount)
            .await
            .expect_err("rejected");

        assert_eq!(err.code(), expected);
        assert_eq!(app.ledger().list_transactions().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn investment_latency_is_applied() {
        let mut app = app_signed_in_as(Some(investor()))
            .with_investment_latency(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        app.invest("1", "100").await.expect("invest");

        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[rstest]
    fn only_entrepreneurs_list_projects() {
        let mut app = app_signed_in_as(Some(developer()));
        let err = app
            .create_project("Hydro Pump", DESCRIPTION, ProjectCategory::Energy)
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);

        let mut app = app_signed_in_as(Some(entrepreneur()));
        let listed = app
            .create_project("Hydro Pump", DESCRIPTION, ProjectCategory::Energy)
            .expect("listed");
        assert_eq!(listed.creator_name, "Alice Dupont");
        assert_eq!(app.ledger().list_projects().len(), 3);
    }

    #[rstest]
    fn short_descriptions_are_invalid() {
        let mut app = app_signed_in_as(Some(entrepreneur()));
        let err = app
            .create_project("Hydro Pump", "too short", ProjectCategory::Energy)
            .expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}

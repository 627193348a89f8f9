//! Deterministic ledger generation.
//!
//! This module produces reproducible marketplace ledgers for demos and
//! property tests. The same [`GeneratorConfig`] always produces identical
//! output, and every generated ledger passes [`SeedLedger`] validation.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::faker::lorem::raw::{Paragraph, Word};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use crate::error::GenerationError;
use crate::fixture::SeedLedger;
use crate::seed::{
    AccountSeed, ProjectSeed, ProjectStatusSeed, RoleSeed, TransactionSeed, TransactionStatusSeed,
    TransactionTypeSeed, UserSeed,
};
use crate::validation::is_valid_project_description;

/// Maximum number of attempts to generate a unique display name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Maximum number of attempts to generate a long enough description.
const MAX_DESCRIPTION_ATTEMPTS: usize = 20;

/// One user per role is needed to attach projects and counterparties.
const MIN_USERS: usize = 3;

/// Position of the second founder, who lets creators contract each other.
const SECOND_FOUNDER_INDEX: usize = 3;

/// Transactions follow a repeating schedule of this many rows.
const SCHEDULE_PERIOD: usize = 10;

/// Schedule slot where a project creator contracts another founder.
const FOUNDER_CONTRACT_SLOT: usize = 4;

/// Schedule slot where a project creator pays themselves.
const SELF_TRANSFER_SLOT: usize = 9;

/// SHA-256 digest of the shared demo password `password123`.
pub const DEMO_PASSWORD_SHA256: &str =
    "ef92b778bafe771e89245b89ecbc08a44a4e166c06659911881f383d4473e94f";

/// Category keys assigned to generated projects.
const CATEGORIES: [&str; 4] = ["tech", "health", "energy", "transport"];

/// Generated amounts are whole multiples of this step.
const AMOUNT_STEP: u32 = 100;

/// Upper bound on the number of amount steps per transaction.
const MAX_AMOUNT_STEPS: u32 = 500;

/// Projects are created up to this many days before the epoch.
const MAX_PROJECT_AGE_DAYS: i64 = 365;

/// Projects are created at least this many days before the epoch.
const MIN_PROJECT_AGE_DAYS: i64 = 30;

/// Parameters for a generated ledger.
///
/// # Example
///
/// ```
/// use example_data::{GeneratorConfig, generate_example_ledger};
///
/// let config = GeneratorConfig {
///     seed: 7,
///     user_count: 5,
///     project_count: 3,
///     transaction_count: 10,
///     ..GeneratorConfig::default()
/// };
///
/// let ledger = generate_example_ledger(&config).expect("generated");
/// assert_eq!(ledger.transactions().len(), 10);
/// assert_eq!(ledger, generate_example_ledger(&config).expect("generated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// RNG seed; identical seeds yield identical ledgers.
    pub seed: u64,
    /// Number of directory users. At least three.
    pub user_count: usize,
    /// Number of projects.
    pub project_count: usize,
    /// Number of transactions. Ignored when no projects are generated.
    pub transaction_count: usize,
    /// Unix timestamp (seconds) that all generated dates precede.
    pub epoch_seconds: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            user_count: 12,
            project_count: 10,
            transaction_count: 40,
            // 2025-03-31T00:00:00Z
            epoch_seconds: 1_743_379_200,
        }
    }
}

/// Generates a complete ledger from the provided configuration.
///
/// The first three users cover the entrepreneur, investor, and developer
/// roles, and each of them gets a demo login account. The fourth user, when
/// requested, is a second entrepreneur. Project totals are derived from the
/// generated investment transactions, so the ledger reconciles.
///
/// Within every block of ten transactions, the fifth is a development
/// payment from the project creator to another founder (or to a developer
/// when there is only one founder) and the tenth is a development payment
/// the creator makes to themselves. The bundled fixture carries the same
/// kinds of rows.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Fewer than three users are requested
/// - The epoch cannot be represented as a timestamp
/// - Unique names or valid descriptions cannot be produced
pub fn generate_example_ledger(config: &GeneratorConfig) -> Result<SeedLedger, GenerationError> {
    if config.user_count < MIN_USERS {
        return Err(GenerationError::NotEnoughUsers {
            required: MIN_USERS,
            actual: config.user_count,
        });
    }
    let epoch = DateTime::<Utc>::from_timestamp(config.epoch_seconds, 0)
        .ok_or(GenerationError::EpochOutOfRange)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let users = generate_users(&mut rng, config.user_count)?;
    let accounts = users
        .iter()
        .take(MIN_USERS)
        .map(|user| AccountSeed {
            user: user.clone(),
            password_sha256: DEMO_PASSWORD_SHA256.to_owned(),
        })
        .collect();

    let cast = Cast::from_users(&users);
    let mut projects = Vec::with_capacity(config.project_count);
    for index in 0..config.project_count {
        projects.push(generate_project(&mut rng, &cast, index, epoch)?);
    }

    let mut transactions = Vec::new();
    if !projects.is_empty() {
        transactions.reserve(config.transaction_count);
        for index in 0..config.transaction_count {
            transactions.push(generate_transaction(&mut rng, &cast, &projects, index, epoch)?);
        }
    }
    apply_investment_totals(&mut projects, &transactions);

    SeedLedger::from_parts(users, accounts, projects, transactions).map_err(Into::into)
}

/// Users grouped by role for counterparty selection.
struct Cast<'a> {
    entrepreneurs: Vec<&'a UserSeed>,
    investors: Vec<&'a UserSeed>,
    developers: Vec<&'a UserSeed>,
}

impl<'a> Cast<'a> {
    fn from_users(users: &'a [UserSeed]) -> Self {
        let by_role = |role: RoleSeed| -> Vec<&'a UserSeed> {
            users.iter().filter(|u| u.role == role).collect()
        };
        Self {
            entrepreneurs: by_role(RoleSeed::Entrepreneur),
            investors: by_role(RoleSeed::Investor),
            developers: by_role(RoleSeed::Developer),
        }
    }
}

fn generate_users(rng: &mut ChaCha8Rng, count: usize) -> Result<Vec<UserSeed>, GenerationError> {
    let mut names = HashSet::with_capacity(count);
    let mut users = Vec::with_capacity(count);

    for index in 0..count {
        let role = match index {
            0 => RoleSeed::Entrepreneur,
            1 => RoleSeed::Investor,
            2 => RoleSeed::Developer,
            SECOND_FOUNDER_INDEX => RoleSeed::Entrepreneur,
            _ => random_role(rng),
        };
        let name = generate_display_name(rng, &mut names)?;
        let id = (index + 1).to_string();
        let email = format!("{}.{id}@example.com", email_local_part(&name));
        users.push(UserSeed {
            id,
            name,
            email,
            role,
            profile_image: None,
        });
    }

    Ok(users)
}

fn random_role(rng: &mut ChaCha8Rng) -> RoleSeed {
    match rng.random_range(0..3_u8) {
        0 => RoleSeed::Entrepreneur,
        1 => RoleSeed::Investor,
        _ => RoleSeed::Developer,
    }
}

/// Generates a display name not yet present in `taken`.
fn generate_display_name(
    rng: &mut ChaCha8Rng,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = format!("{first} {last}");

        if taken.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::DisplayNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn email_local_part(name: &str) -> String {
    name.split_whitespace()
        .map(|part| {
            part.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

fn generate_project(
    rng: &mut ChaCha8Rng,
    cast: &Cast<'_>,
    index: usize,
    epoch: DateTime<Utc>,
) -> Result<ProjectSeed, GenerationError> {
    let creator = pick(rng, &cast.entrepreneurs).ok_or(GenerationError::NotEnoughUsers {
        required: MIN_USERS,
        actual: 0,
    })?;
    let company: String = CompanyName(EN).fake_with_rng(rng);
    let noun: String = Word(EN).fake_with_rng(rng);
    let title = format!("{company} {noun}");
    let description = generate_description(rng)?;
    let category = pick(rng, &CATEGORIES).copied().unwrap_or("tech").to_owned();

    let age_days = rng.random_range(MIN_PROJECT_AGE_DAYS..=MAX_PROJECT_AGE_DAYS);
    let created_at = shift(epoch, -TimeDelta::days(age_days))?;
    let updated_at = shift(created_at, TimeDelta::days(rng.random_range(0..=age_days)))?;

    let status = match rng.random_range(0..10_u8) {
        0..=5 => ProjectStatusSeed::Active,
        6..=8 => ProjectStatusSeed::Pending,
        _ => ProjectStatusSeed::Expired,
    };

    Ok(ProjectSeed {
        id: (index + 1).to_string(),
        title,
        description,
        category,
        creator_id: creator.id.clone(),
        creator_name: creator.name.clone(),
        status,
        created_at,
        updated_at,
        investment: None,
        investors: None,
        developers_count: Some(rng.random_range(0..=10)),
    })
}

fn generate_description(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_DESCRIPTION_ATTEMPTS {
        let candidate: String = Paragraph(EN, 2..5).fake_with_rng(rng);
        if is_valid_project_description(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::DescriptionGenerationFailed {
        max_attempts: MAX_DESCRIPTION_ATTEMPTS,
    })
}

fn generate_transaction(
    rng: &mut ChaCha8Rng,
    cast: &Cast<'_>,
    projects: &[ProjectSeed],
    index: usize,
    epoch: DateTime<Utc>,
) -> Result<TransactionSeed, GenerationError> {
    let missing = GenerationError::NotEnoughUsers {
        required: MIN_USERS,
        actual: 0,
    };
    let project = pick(rng, projects).ok_or_else(|| missing.clone())?;

    let slot = index.checked_rem(SCHEDULE_PERIOD).unwrap_or_default();
    let kind = match slot {
        FOUNDER_CONTRACT_SLOT | SELF_TRANSFER_SLOT => TransactionTypeSeed::Development,
        _ => match rng.random_range(0..10_u8) {
            0..=5 => TransactionTypeSeed::Investment,
            6..=7 => TransactionTypeSeed::Development,
            _ => TransactionTypeSeed::Sale,
        },
    };
    let (from, to) = match kind {
        TransactionTypeSeed::Investment => {
            let investor = pick(rng, &cast.investors).ok_or_else(|| missing.clone())?;
            (investor.name.clone(), project.creator_name.clone())
        }
        TransactionTypeSeed::Development => {
            let payee = match slot {
                SELF_TRANSFER_SLOT => project.creator_name.clone(),
                FOUNDER_CONTRACT_SLOT => match pick_other_founder(rng, cast, &project.creator_name) {
                    Some(founder) => founder.name.clone(),
                    None => pick(rng, &cast.developers)
                        .ok_or_else(|| missing.clone())?
                        .name
                        .clone(),
                },
                _ => pick(rng, &cast.developers)
                    .ok_or_else(|| missing.clone())?
                    .name
                    .clone(),
            };
            (project.creator_name.clone(), payee)
        }
        TransactionTypeSeed::Sale => {
            let buyer: String = CompanyName(EN).fake_with_rng(rng);
            (buyer, project.creator_name.clone())
        }
    };

    let status = if rng.random_ratio(8, 10) {
        TransactionStatusSeed::Completed
    } else if rng.random_ratio(1, 2) {
        TransactionStatusSeed::Pending
    } else {
        TransactionStatusSeed::Failed
    };

    let window_hours = (epoch - project.created_at).num_hours().max(1);
    let date = shift(
        project.created_at,
        TimeDelta::hours(rng.random_range(1..=window_hours)),
    )?;

    Ok(TransactionSeed {
        id: (index + 1).to_string(),
        project_id: project.id.clone(),
        project_title: project.title.clone(),
        amount: Decimal::from(rng.random_range(1..=MAX_AMOUNT_STEPS) * AMOUNT_STEP),
        kind,
        status,
        date,
        from,
        to,
    })
}

/// Picks an entrepreneur other than `creator`, if one exists.
fn pick_other_founder<'a>(
    rng: &mut ChaCha8Rng,
    cast: &Cast<'a>,
    creator: &str,
) -> Option<&'a UserSeed> {
    let others: Vec<&'a UserSeed> = cast
        .entrepreneurs
        .iter()
        .copied()
        .filter(|founder| founder.name != creator)
        .collect();
    pick(rng, &others).copied()
}

/// Sets each project's cumulative investment and investor count from the
/// investment transactions that reference it.
fn apply_investment_totals(projects: &mut [ProjectSeed], transactions: &[TransactionSeed]) {
    for project in projects {
        let investments = transactions
            .iter()
            .filter(|t| t.kind == TransactionTypeSeed::Investment && t.project_id == project.id);
        let (total, count) = investments.fold((Decimal::ZERO, 0_u32), |(sum, n), t| {
            (sum + t.amount, n.saturating_add(1))
        });
        project.investment = Some(total);
        project.investors = Some(count);
    }
}

fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}

fn shift(at: DateTime<Utc>, delta: TimeDelta) -> Result<DateTime<Utc>, GenerationError> {
    at.checked_add_signed(delta)
        .ok_or(GenerationError::EpochOutOfRange)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests fail fast on generation errors")]

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[fixture]
    fn ledger(config: GeneratorConfig) -> SeedLedger {
        generate_example_ledger(&config).expect("generation should succeed")
    }

    #[rstest]
    fn generates_requested_counts(config: GeneratorConfig, ledger: SeedLedger) {
        assert_eq!(ledger.users().len(), config.user_count);
        assert_eq!(ledger.projects().len(), config.project_count);
        assert_eq!(ledger.transactions().len(), config.transaction_count);
        assert_eq!(ledger.accounts().len(), MIN_USERS);
    }

    #[rstest]
    fn generation_is_deterministic(config: GeneratorConfig, ledger: SeedLedger) {
        let again = generate_example_ledger(&config).expect("generated");
        assert_eq!(again, ledger);
    }

    #[rstest]
    fn different_seeds_produce_different_ledgers(config: GeneratorConfig, ledger: SeedLedger) {
        let other = generate_example_ledger(&GeneratorConfig { seed: 7, ..config })
            .expect("generated");
        assert_ne!(other.users(), ledger.users());
    }

    #[rstest]
    fn first_users_cover_every_role(ledger: SeedLedger) {
        let roles: Vec<_> = ledger.users().iter().take(3).map(|u| u.role).collect();
        assert_eq!(
            roles,
            vec![
                RoleSeed::Entrepreneur,
                RoleSeed::Investor,
                RoleSeed::Developer
            ]
        );
    }

    #[rstest]
    fn fourth_user_is_a_second_founder(ledger: SeedLedger) {
        let founder = ledger.users().get(SECOND_FOUNDER_INDEX).expect("fourth user");
        assert_eq!(founder.role, RoleSeed::Entrepreneur);
    }

    #[rstest]
    fn scheduled_rows_include_self_transfers_and_founder_contracts(ledger: SeedLedger) {
        let founders: HashSet<_> = ledger
            .users()
            .iter()
            .filter(|u| u.role == RoleSeed::Entrepreneur)
            .map(|u| u.name.as_str())
            .collect();

        for (index, transaction) in ledger.transactions().iter().enumerate() {
            match index.checked_rem(SCHEDULE_PERIOD).unwrap_or_default() {
                SELF_TRANSFER_SLOT => {
                    assert_eq!(transaction.kind, TransactionTypeSeed::Development);
                    assert_eq!(transaction.from, transaction.to);
                }
                FOUNDER_CONTRACT_SLOT => {
                    assert_eq!(transaction.kind, TransactionTypeSeed::Development);
                    assert_ne!(transaction.from, transaction.to);
                    assert!(founders.contains(transaction.to.as_str()));
                }
                _ => {}
            }
        }
        let self_transfers = ledger
            .transactions()
            .iter()
            .filter(|t| t.from == t.to)
            .count();
        assert_eq!(self_transfers, 4);
    }

    #[rstest]
    fn lone_founders_contract_developers(config: GeneratorConfig) {
        let ledger = generate_example_ledger(&GeneratorConfig {
            user_count: 3,
            ..config
        })
        .expect("generated");
        let contract = ledger
            .transactions()
            .get(FOUNDER_CONTRACT_SLOT)
            .expect("scheduled contract");
        let developer = ledger.users().get(2).expect("developer");
        assert_eq!(contract.kind, TransactionTypeSeed::Development);
        assert_eq!(contract.to, developer.name);
    }

    #[rstest]
    fn display_names_are_unique(ledger: SeedLedger) {
        let names: HashSet<_> = ledger.users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names.len(), ledger.users().len());
    }

    #[rstest]
    fn descriptions_meet_minimum_length(ledger: SeedLedger) {
        assert!(
            ledger
                .projects()
                .iter()
                .all(|p| is_valid_project_description(&p.description))
        );
    }

    #[rstest]
    fn dates_precede_epoch(config: GeneratorConfig, ledger: SeedLedger) {
        let epoch = DateTime::<Utc>::from_timestamp(config.epoch_seconds, 0).expect("epoch");
        assert!(ledger.projects().iter().all(|p| p.created_at <= p.updated_at));
        assert!(ledger.projects().iter().all(|p| p.updated_at <= epoch));
        assert!(ledger.transactions().iter().all(|t| t.date <= epoch));
    }

    #[rstest]
    fn project_totals_match_investments(ledger: SeedLedger) {
        for project in ledger.projects() {
            let expected: Decimal = ledger
                .transactions()
                .iter()
                .filter(|t| {
                    t.project_id == project.id && t.kind == TransactionTypeSeed::Investment
                })
                .map(|t| t.amount)
                .sum();
            assert_eq!(project.investment, Some(expected), "project {}", project.id);
        }
    }

    #[rstest]
    fn investments_flow_from_investors_to_creators(ledger: SeedLedger) {
        let investors: HashSet<_> = ledger
            .users()
            .iter()
            .filter(|u| u.role == RoleSeed::Investor)
            .map(|u| u.name.as_str())
            .collect();

        for transaction in ledger.transactions() {
            let project = ledger
                .projects()
                .iter()
                .find(|p| p.id == transaction.project_id)
                .expect("referenced project");
            if transaction.kind == TransactionTypeSeed::Investment {
                assert!(investors.contains(transaction.from.as_str()));
                assert_eq!(transaction.to, project.creator_name);
            }
        }
    }

    #[rstest]
    fn rejects_too_few_users(config: GeneratorConfig) {
        let result = generate_example_ledger(&GeneratorConfig {
            user_count: 2,
            ..config
        });
        assert_eq!(
            result,
            Err(GenerationError::NotEnoughUsers {
                required: 3,
                actual: 2
            })
        );
    }

    #[rstest]
    fn skips_transactions_without_projects(config: GeneratorConfig) {
        let ledger = generate_example_ledger(&GeneratorConfig {
            project_count: 0,
            ..config
        })
        .expect("generated");
        assert!(ledger.transactions().is_empty());
    }

    #[rstest]
    fn rejects_unrepresentable_epoch(config: GeneratorConfig) {
        let result = generate_example_ledger(&GeneratorConfig {
            epoch_seconds: i64::MAX,
            ..config
        });
        assert_eq!(result, Err(GenerationError::EpochOutOfRange));
    }

    #[rstest]
    #[case("Ada Lovelace", "ada.lovelace")]
    #[case("Conan O'Brien", "conan.obrien")]
    fn email_local_part_is_slugged(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(email_local_part(name), expected);
    }
}

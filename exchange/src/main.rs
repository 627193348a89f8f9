//! `exchange` command-line shell over the patent exchange ledger.
//!
//! Each invocation restores the persisted session, runs one command, and
//! prints a plain-text rendering to stdout. Logs go to stderr.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use color_eyre::Section;
use color_eyre::eyre::{Context, Report, Result, eyre};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use exchange::domain::{
    CategoryFilter, Dashboard, DomainError, Project, ProjectCategory, RoleFilter, SortDirection, SortKey,
    StatFormat, Transaction, TypeFilter, User, UserRole, UserStatistics, counterparty,
};
use exchange::{ExchangeApp, ExchangeSettings, LogFormat, TransactionRow};
use ortho_config::OrthoConfig;

/// `exchange` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "exchange",
    about = "Browse, fund, and list patents on the exchange ledger",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in with a demo or registered account.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in as it.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
        /// One of `entrepreneur`, `investor`, or `developer`.
        #[arg(long)]
        role: UserRole,
    },
    /// Forget the signed-in user.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show the signed-in user's statistics.
    Stats,
    /// Show statistics, projects, and recent activity.
    Dashboard,
    /// List the signed-in user's transactions.
    Transactions {
        /// `all`, `investment`, `sale`, or `development`.
        #[arg(long = "type", default_value = "all")]
        kind: TypeFilter,
        /// `date` or `amount`.
        #[arg(long, default_value = "date")]
        sort: SortKey,
        /// `asc` or `desc`.
        #[arg(long, default_value = "desc")]
        order: SortDirection,
    },
    /// Search the project catalogue.
    Projects {
        /// `all` or a category key.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Case-insensitive text matched against title and description.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Invest in a project as the signed-in user.
    Invest {
        /// Project identifier.
        project_id: String,
        /// Amount to invest.
        amount: String,
    },
    /// List a new project as the signed-in entrepreneur.
    CreateProject {
        /// Listing title.
        #[arg(long)]
        title: String,
        /// Listing description.
        #[arg(long)]
        description: String,
        /// `tech`, `health`, `energy`, or `transport`.
        #[arg(long)]
        category: ProjectCategory,
    },
    /// Search the user directory.
    Users {
        /// Case-insensitive text matched against name and email.
        #[arg(long, default_value = "")]
        search: String,
        /// `all` or a role.
        #[arg(long, default_value = "all")]
        role: RoleFilter,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = ExchangeSettings::load_from_iter([OsString::from("exchange")])
        .map_err(|err| eyre!("failed to load exchange settings: {err}"))?;
    init_tracing(settings.log_format());

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build exchange runtime")?;
    runtime.block_on(run(args.command, &settings))
}

fn init_tracing(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}

async fn run(command: Command, settings: &ExchangeSettings) -> Result<()> {
    let mut app = ExchangeApp::bootstrap(settings).wrap_err("failed to start the exchange")?;
    let mut out = io::stdout().lock();

    match command {
        Command::Login { email, password } => {
            let user = app.login(&email, &password).await.map_err(domain_report)?;
            writeln!(out, "Signed in as {}", describe_user(user))?;
        }
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            let user = app
                .register(&name, &email, &password, role)
                .await
                .map_err(domain_report)?;
            writeln!(out, "Registered {}", describe_user(user))?;
        }
        Command::Logout => {
            app.logout().map_err(domain_report)?;
            writeln!(out, "Signed out")?;
        }
        Command::Whoami => match app.current_user() {
            Some(user) => writeln!(out, "{}", describe_user(user))?,
            None => writeln!(out, "Not signed in")?,
        },
        Command::Stats => write_statistics(&mut out, &app.statistics().map_err(domain_report)?)?,
        Command::Dashboard => {
            let role = app
                .current_user()
                .map_or(UserRole::Unknown, User::role);
            let dashboard = app.dashboard().map_err(domain_report)?;
            write_dashboard(&mut out, &dashboard, role)?;
        }
        Command::Transactions { kind, sort, order } => {
            let role = app
                .current_user()
                .map_or(UserRole::Unknown, User::role);
            let rows = app
                .transactions(kind, sort, order)
                .map_err(domain_report)?;
            write_transaction_rows(&mut out, &rows, role)?;
        }
        Command::Projects { category, search } => {
            let projects = app.projects(&search, category);
            writeln!(out, "{} project(s)", projects.len())?;
            for project in projects {
                write_project(&mut out, project)?;
            }
        }
        Command::Invest { project_id, amount } => {
            let recorded = app
                .invest(&project_id, &amount)
                .await
                .map_err(domain_report)?;
            writeln!(
                out,
                "Recorded transaction {}: {} invested in {}",
                recorded.id,
                money(&recorded.amount.to_string()),
                recorded.project_title
            )?;
        }
        Command::CreateProject {
            title,
            description,
            category,
        } => {
            let project = app
                .create_project(&title, &description, category)
                .map_err(domain_report)?;
            writeln!(
                out,
                "Listed project {}: {} ({})",
                project.id,
                project.title,
                project.status.label()
            )?;
        }
        Command::Users { search, role } => {
            let (users, counts) = app.users(&search, role);
            writeln!(out, "{counts}")?;
            for user in users {
                writeln!(out, "  {} <{}>", describe_user(user), user.email())?;
            }
        }
    }
    Ok(())
}

/// Wrap a domain failure, noting which argument was rejected.
fn domain_report(err: DomainError) -> Report {
    let hint = field_hint(&err);
    let report = Report::new(err);
    match hint {
        Some(hint) => report.note(hint),
        None => report,
    }
}

fn field_hint(err: &DomainError) -> Option<String> {
    err.field()
        .map(|field| format!("check the `{}` argument", field.replace('_', "-")))
}

fn describe_user(user: &User) -> String {
    format!("{} ({})", user.name(), user.role().label())
}

fn money(value: &str) -> String {
    format!("{value} EUR")
}

fn write_statistics(out: &mut impl Write, stats: &UserStatistics) -> io::Result<()> {
    if stats.main_label.is_empty() {
        return writeln!(out, "No statistics for this role");
    }
    writeln!(
        out,
        "{}: {}",
        stats.main_label,
        money(&stats.main_value.to_string())
    )?;
    writeln!(out, "{}: {}", stats.secondary_label, stats.secondary_value)?;
    writeln!(out, "{}: {}", stats.tertiary_label, stats.tertiary_value)?;
    for entry in &stats.stats {
        let value = match entry.format {
            StatFormat::Currency => money(&entry.value.to_string()),
            StatFormat::Count => entry.value.to_string(),
        };
        writeln!(out, "  {}: {value}", entry.label)?;
    }
    Ok(())
}

fn write_dashboard(out: &mut impl Write, dashboard: &Dashboard<'_>, role: UserRole) -> io::Result<()> {
    write_statistics(out, &dashboard.statistics)?;
    writeln!(out)?;
    writeln!(out, "Projects ({})", dashboard.projects.len())?;
    for project in &dashboard.projects {
        write_project(out, project)?;
    }
    writeln!(out)?;
    writeln!(out, "Recent activity")?;
    for transaction in &dashboard.recent_transactions {
        write_transaction(out, transaction, role, None)?;
    }
    let summary = &dashboard.summary;
    writeln!(
        out,
        "{} transaction(s), total {} (investments {}, sales {}, development {})",
        summary.count,
        money(&summary.total.to_string()),
        money(&summary.investments.to_string()),
        money(&summary.sales.to_string()),
        money(&summary.development.to_string())
    )
}

fn write_transaction_rows(
    out: &mut impl Write,
    rows: &[TransactionRow],
    role: UserRole,
) -> io::Result<()> {
    writeln!(out, "{} transaction(s)", rows.len())?;
    for row in rows {
        write_transaction(out, &row.transaction, role, Some(row.direction.label()))?;
    }
    Ok(())
}

fn write_transaction(
    out: &mut impl Write,
    transaction: &Transaction,
    role: UserRole,
    direction: Option<&str>,
) -> io::Result<()> {
    writeln!(
        out,
        "  {} #{} {:<11} {:>12} {} {} [{}] {}",
        transaction.date.format("%Y-%m-%d"),
        transaction.id,
        transaction.kind.label(),
        money(&transaction.amount.to_string()),
        direction.unwrap_or(""),
        counterparty(transaction, role),
        transaction.status.label(),
        transaction.project_title
    )
}

fn write_project(out: &mut impl Write, project: &Project) -> io::Result<()> {
    writeln!(
        out,
        "  #{} {} [{} / {}] by {}: {} from {} investor(s)",
        project.id,
        project.title,
        project.category.label(),
        project.status.label(),
        project.creator_name,
        money(&project.investment.to_string()),
        project.investors
    )
}

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::warn;

use exam_ops_console::config::Config;
use exam_ops_console::filter::{
    self, count_heading, DocumentFilter, ExamFilter, MonitoringPhase, UserFilter,
};
use exam_ops_console::fixtures::{self, Fixtures};
use exam_ops_console::models::{AlertRecord, DocumentRecord, ExamRecord, UserRecord};
use exam_ops_console::report;
use exam_ops_console::session::{ProfileUpdate, SessionStore};
use exam_ops_console::status::{self, StatusTag};
use exam_ops_console::timefmt::{format_relative, DisplayZone};

#[derive(Parser)]
#[command(name = "exam-ops-console")]
#[command(about = "Examination logistics console for proctors, centers and documents", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference time for relative timestamps (RFC 3339, default: now)
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline numbers, alerts, running and upcoming exams
    Dashboard,
    /// Search and filter staff accounts
    Users {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "all")]
        status: UserFilter,
        /// Append users from a CSV file before listing
        #[arg(long)]
        import: Option<PathBuf>,
    },
    /// Search and filter examination events
    Exams {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "all")]
        filter: ExamFilter,
    },
    /// Search and filter submitted documents
    Documents {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "all")]
        filter: DocumentFilter,
    },
    /// Approve or reject documents (not connected to a backend; changes nothing)
    Review {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        reject: bool,
    },
    /// Exams grouped by monitoring phase
    Monitor {
        #[arg(long, default_value = "installation")]
        phase: MonitoringPhase,
    },
    /// Alerts requiring attention
    Alerts,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Sign in as an administrator
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and store the signed-out session
    Logout,
    /// Show the signed-in administrator
    Whoami,
    /// Edit the signed-in administrator's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let zone = config.display_zone()?;
    let now = cli.now.unwrap_or_else(Utc::now);
    let mut session = SessionStore::load(&config.session_file, config.demo_session, now);
    let mut fixtures = Fixtures::load().context("failed to build fixture collections")?;

    match cli.command {
        Commands::Dashboard => print_dashboard(&fixtures, &session, zone, now),
        Commands::Users {
            query,
            status: tab,
            import,
        } => {
            if let Some(csv) = import {
                let inserted = fixtures::import_users_csv(&mut fixtures.users, &csv)?;
                println!("Imported {inserted} users from {}.", csv.display());
            }

            let counts = filter::user_status_counts(&fixtures.users);
            let summary: Vec<String> = counts
                .iter()
                .map(|count| format!("{}: {}", count.tag.label(), count.count))
                .collect();
            println!("Total Users: {} | {}", fixtures.users.len(), summary.join(" | "));

            let users = filter::filter_users(&fixtures.users, &query, tab);
            println!("{}", count_heading(users.len(), "User"));
            if users.is_empty() {
                println!("No users found.");
            }
            for user in users {
                print_user(user);
            }
        }
        Commands::Exams { query, filter: tab } => {
            let exams = filter::filter_exams(&fixtures.exams, &query, tab);
            println!("{}", count_heading(exams.len(), "Exam"));
            if exams.is_empty() {
                println!("No exams found.");
            }
            for exam in exams {
                print_exam(exam, zone);
            }
        }
        Commands::Documents { query, filter: tab } => {
            let counts = filter::document_status_counts(&fixtures.documents);
            let summary: Vec<String> = counts
                .iter()
                .map(|count| format!("{}: {}", count.tag.label(), count.count))
                .collect();
            println!("{}", summary.join(" | "));

            let documents = filter::filter_documents(&fixtures.documents, &query, tab);
            println!("{}", count_heading(documents.len(), "Document"));
            if documents.is_empty() {
                println!("No documents found.");
            }
            for doc in documents {
                print_document(doc, fixtures.user(&doc.submitted_by.id), now);
            }
        }
        Commands::Review { ids, reject } => {
            for id in &ids {
                if !fixtures.documents.iter().any(|doc| &doc.id == id) {
                    anyhow::bail!("no document with id '{id}'");
                }
            }
            let action = if reject { "reject" } else { "approve" };
            warn!(
                "{action} is not connected to a document service; {} left unchanged",
                ids.join(", ")
            );
            println!("Nothing changed: document review is read-only in this console.");
        }
        Commands::Monitor { phase } => {
            let exams = filter::exams_in_phase(&fixtures.exams, phase);
            println!("{}: {}", phase.title(), count_heading(exams.len(), "Exam"));
            if exams.is_empty() {
                println!("No exams in this phase.");
            }
            for exam in exams {
                print_exam(exam, zone);
            }
        }
        Commands::Alerts => {
            if fixtures.alerts.is_empty() {
                println!("No open alerts.");
            }
            for alert in &fixtures.alerts {
                print_alert(alert, now);
            }
        }
        Commands::Report { out } => {
            let report = report::build_report(&fixtures, zone, now);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Login { email, password } => {
            let user = session.login(&email, &password, now)?;
            println!("Signed in as {} ({}).", user.name, user.email);
        }
        Commands::Logout => {
            session.logout()?;
            println!("Signed out; session saved to {}.", session.path().display());
        }
        Commands::Whoami => match session.current_user() {
            Some(user) => {
                println!("{} [{}]", user.name, status::initials(&user.name));
                println!("  {}", user.email);
                println!("  {}", user.role.label());
                println!("  Last login {}", format_relative(user.last_login, now));
            }
            None => println!("Not signed in."),
        },
        Commands::Profile {
            name,
            email,
            avatar,
        } => {
            let user = session.update_profile(ProfileUpdate {
                name,
                email,
                avatar,
            })?;
            println!("Profile updated: {} ({}).", user.name, user.email);
        }
    }

    Ok(())
}

fn badge(tag: &StatusTag) -> String {
    let class = tag.classify();
    format!("[{} | {}]", class.label, class.color)
}

fn print_dashboard(
    fixtures: &Fixtures,
    session: &SessionStore,
    zone: DisplayZone,
    now: DateTime<Utc>,
) {
    match session.current_user() {
        Some(user) => println!("Welcome back, {}", user.name),
        None => println!("Not signed in."),
    }

    let stats = &fixtures.stats;
    println!();
    println!("Active Exams: {}", stats.active_exams);
    println!("Registered Users: {}", stats.registered_users);
    println!("Pending Approvals: {}", stats.pending_approvals);
    println!("Completed Exams: {}", stats.completed_exams);

    println!();
    println!("Alerts");
    for alert in &fixtures.alerts {
        print_alert(alert, now);
    }

    println!();
    println!("Exams in Progress");
    for exam in filter::filter_exams(&fixtures.exams, "", ExamFilter::InProgress) {
        print_exam(exam, zone);
    }

    println!();
    println!("Upcoming Exams");
    for exam in filter::filter_exams(&fixtures.exams, "", ExamFilter::Upcoming)
        .into_iter()
        .take(2)
    {
        print_exam(exam, zone);
    }

    println!();
    println!("Recent Activity");
    for item in &fixtures.activity {
        println!(
            "- [{}] {} ({}, {})",
            status::initials(&item.actor.name),
            item.message,
            item.actor.name,
            format_relative(item.timestamp, now)
        );
    }
}

fn print_user(user: &UserRecord) {
    println!(
        "- [{}] {} ({}) {}",
        status::initials(&user.name),
        user.name,
        status::role_label(user.role.as_str()),
        badge(&user.status.tag())
    );
    println!("    {} | {} | {}", user.email, user.phone, user.location);
}

fn print_exam(exam: &ExamRecord, zone: DisplayZone) {
    println!("- {} {}", exam.title, badge(&exam.status.tag()));
    println!(
        "    {} | {} centers | {} staff",
        zone.format_date(exam.date),
        exam.centers,
        exam.staff
    );
    if let Some(completion) = exam.visible_completion() {
        println!("    {completion}% complete");
    }
}

fn print_document(doc: &DocumentRecord, submitter: Option<&UserRecord>, now: DateTime<Utc>) {
    println!("- {} {}", doc.title, badge(&doc.status.tag()));
    println!(
        "    {} | submitted by {} {}",
        status::document_type_label(&doc.doc_type),
        doc.submitted_by.name,
        format_relative(doc.submitted_at, now)
    );
    if let Some(user) = submitter {
        println!("    contact: {} | {}", user.email, user.location);
    }
    if let Some(url) = &doc.url {
        println!("    preview: {url}");
    }
}

fn print_alert(alert: &AlertRecord, now: DateTime<Utc>) {
    println!(
        "- {} {} ({}, {})",
        badge(&alert.severity.tag()),
        alert.message,
        status::humanize(&alert.alert_type),
        format_relative(alert.timestamp, now)
    );
}

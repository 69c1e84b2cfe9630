use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobmirror::applications::{ApplicationDraft, ApplicationStatus, ApplicationsRepository};
use jobmirror::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_APPLICATIONS_INTERVAL_SECS,
    DEFAULT_BADGE_INTERVAL_SECS, DEFAULT_SAVED_JOBS_INTERVAL_SECS,
};
use jobmirror::events::EventBus;
use jobmirror::jobs::{JobDraft, JobsRepository};
use jobmirror::reconciler::spawn_watch;
use jobmirror::saved_jobs::SavedJobsRepository;
use jobmirror::storage::{CollectionStore, SqliteStorage};

/// Resolve a CLI path argument to an absolute path. The store database may
/// not exist yet, so a missing file is not an error.
fn parse_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if path.is_absolute() {
                Ok(path)
            } else {
                Ok(std::env::current_dir()?.join(path))
            }
        }
        Err(err) => Err(err).with_context(|| format!("Failed to resolve path {}", s)),
    }
}

#[derive(Parser, Debug)]
#[clap(name = "jobmirror", about = "Inspect and mutate the local job board store")]
struct CliArgs {
    /// Path to the SQLite local store database file.
    #[clap(long, value_parser = parse_path)]
    store_path: Option<PathBuf>,

    /// Optional TOML config file; values override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    config: Option<PathBuf>,

    /// Saved-jobs reconciler poll interval in seconds.
    #[clap(long, default_value_t = DEFAULT_SAVED_JOBS_INTERVAL_SECS)]
    saved_jobs_interval_secs: u64,

    /// Applications reconciler poll interval in seconds.
    #[clap(long, default_value_t = DEFAULT_APPLICATIONS_INTERVAL_SECS)]
    applications_interval_secs: u64,

    /// Badge-count poll interval in seconds.
    #[clap(long, default_value_t = DEFAULT_BADGE_INTERVAL_SECS)]
    badge_interval_secs: u64,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locally created jobs.
    Jobs {
        #[clap(subcommand)]
        command: JobsCommand,
    },
    /// Saved jobs.
    Saved {
        #[clap(subcommand)]
        command: SavedCommand,
    },
    /// Applications.
    Applications {
        #[clap(subcommand)]
        command: ApplicationsCommand,
    },
    /// Follow a user's saved and applied counts as the store changes.
    Watch { user_id: String },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List created jobs, optionally for one recruiter.
    List {
        #[clap(long)]
        recruiter: Option<String>,
    },
    /// Post a new job.
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        description: String,
        #[clap(long)]
        location: String,
        #[clap(long)]
        requirements: String,
        #[clap(long)]
        recruiter: String,
        #[clap(long)]
        company: Option<String>,
    },
    /// Delete a job by id.
    Remove { job_id: i64 },
    /// Mark a job as no longer hiring.
    Close { job_id: i64 },
    /// Reopen a job for hiring.
    Reopen { job_id: i64 },
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
    List { user_id: String },
    /// Save a created job for a user.
    Add { job_id: i64, user_id: String },
    Remove { job_id: i64, user_id: String },
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List a user's applications.
    List { user_id: String },
    /// List applications received by a job.
    ForJob { job_id: i64 },
    /// Apply to a job.
    Apply {
        job_id: i64,
        candidate_id: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        experience: Option<i64>,
        #[clap(long)]
        education: Option<String>,
        #[clap(long)]
        skills: Option<String>,
    },
    /// Set the status of every application on a job.
    SetStatus {
        job_id: i64,
        /// One of: applied, interviewing, hired, rejected.
        #[clap(value_parser = parse_status)]
        status: ApplicationStatus,
    },
    /// Wipe all application signals.
    Clear,
}

fn parse_status(s: &str) -> Result<ApplicationStatus, String> {
    s.parse()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .ok();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        store_path: cli_args.store_path.clone(),
        saved_jobs_interval_secs: cli_args.saved_jobs_interval_secs,
        applications_interval_secs: cli_args.applications_interval_secs,
        badge_interval_secs: cli_args.badge_interval_secs,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let storage = Arc::new(SqliteStorage::new(&config.store_path)?);
    let store = CollectionStore::new(storage);
    let bus = EventBus::new();

    let jobs = JobsRepository::new(store.clone(), bus.clone());
    let saved = SavedJobsRepository::new(store.clone(), bus.clone());
    let applications = ApplicationsRepository::new(store.clone(), bus.clone());

    match cli_args.command {
        Command::Jobs { command } => match command {
            JobsCommand::List { recruiter } => {
                let list = match recruiter {
                    Some(recruiter) => jobs.list_for_recruiter(&recruiter),
                    None => jobs.list_all(),
                };
                print_json(&list)?;
            }
            JobsCommand::Add {
                title,
                description,
                location,
                requirements,
                recruiter,
                company,
            } => {
                let draft = JobDraft {
                    title,
                    description,
                    location,
                    requirements,
                    recruiter_id: recruiter,
                    company_name: company,
                };
                match jobs.create(draft) {
                    Some(job) => print_json(&job)?,
                    None => anyhow::bail!("job draft rejected: missing required fields"),
                }
            }
            JobsCommand::Remove { job_id } => {
                jobs.remove(job_id);
                info!("Job {} removed", job_id);
            }
            JobsCommand::Close { job_id } => match jobs.set_hiring_status(job_id, false) {
                Some(job) => print_json(&job)?,
                None => anyhow::bail!("job {} not found", job_id),
            },
            JobsCommand::Reopen { job_id } => match jobs.set_hiring_status(job_id, true) {
                Some(job) => print_json(&job)?,
                None => anyhow::bail!("job {} not found", job_id),
            },
        },
        Command::Saved { command } => match command {
            SavedCommand::List { user_id } => print_json(&saved.list_for_user(&user_id))?,
            SavedCommand::Add { job_id, user_id } => {
                let job = jobs
                    .get_by_id(job_id)
                    .with_context(|| format!("job {} not found in local store", job_id))?;
                match saved.add(&job, &user_id) {
                    Some(record) => print_json(&record)?,
                    None => anyhow::bail!("save rejected"),
                }
            }
            SavedCommand::Remove { job_id, user_id } => {
                let removed = saved.remove(job_id, &user_id);
                info!("Removed: {}", removed);
            }
        },
        Command::Applications { command } => match command {
            ApplicationsCommand::List { user_id } => {
                print_json(&applications.list_for_user(&user_id))?
            }
            ApplicationsCommand::ForJob { job_id } => {
                print_json(&applications.list_for_job(job_id))?
            }
            ApplicationsCommand::Apply {
                job_id,
                candidate_id,
                name,
                experience,
                education,
                skills,
            } => {
                let draft = ApplicationDraft {
                    job_id,
                    candidate_id,
                    name,
                    experience,
                    education,
                    skills,
                    job: jobs.get_by_id(job_id),
                    ..Default::default()
                };
                match applications.add(draft) {
                    Some(record) => print_json(&record)?,
                    None => anyhow::bail!("application rejected (duplicate or missing fields)"),
                }
            }
            ApplicationsCommand::SetStatus { job_id, status } => {
                let updated = applications.update_status_for_job(job_id, status);
                info!("Updated {} applications", updated.len());
                print_json(&updated)?;
            }
            ApplicationsCommand::Clear => {
                applications.clear_all();
                info!("Applications cleared");
            }
        },
        Command::Watch { user_id } => {
            info!("Watching store for user {} (ctrl-c to stop)", user_id);

            // The badge count polls faster than the full lists, like the
            // navbar counter in the web client.
            let badge_saved = SavedJobsRepository::new(store.clone(), bus.clone());
            let badge_user = user_id.clone();
            let badge_watch = spawn_watch(
                "saved-badge",
                config.reconciler.badge_interval,
                move || badge_saved.count_for_user(&badge_user),
                |count| println!("saved badge: {}", count),
            );

            let saved_user = user_id.clone();
            let saved_watch = spawn_watch(
                "saved-jobs",
                config.reconciler.saved_jobs_interval,
                move || {
                    saved
                        .list_for_user(&saved_user)
                        .into_iter()
                        .map(|record| record.job_id)
                        .collect::<Vec<_>>()
                },
                |job_ids| println!("saved jobs: {:?}", job_ids),
            );

            let apps_user = user_id.clone();
            let apps_watch = spawn_watch(
                "applications",
                config.reconciler.applications_interval,
                move || {
                    applications
                        .list_for_user(&apps_user)
                        .into_iter()
                        .map(|record| (record.id, record.status))
                        .collect::<Vec<_>>()
                },
                |records| println!("applications: {:?}", records),
            );

            tokio::signal::ctrl_c().await?;
            badge_watch.shutdown().await;
            saved_watch.shutdown().await;
            apps_watch.shutdown().await;
        }
    }

    Ok(())
}

mod analytics;
mod models;
mod seed;
mod state;
mod store;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use models::{Preferences, Role};
use state::Marketplace;
use std::path::PathBuf;
use store::JsonFileStore;

#[derive(Parser)]
#[command(name = "skillhire")]
#[command(about = "Local job marketplace demo - browse jobs, apply, track your pipeline")]
struct Cli {
    /// Override the data directory (defaults to the XDG data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the local store with demo data
    Init {
        /// Overwrite existing data
        #[arg(long)]
        force: bool,
    },

    /// List job postings
    Jobs {
        /// Filter by location substring
        #[arg(short, long)]
        location: Option<String>,

        /// Filter by required skill
        #[arg(short, long)]
        skill: Option<String>,
    },

    /// Show job details
    Show {
        /// Job ID (e.g. J-1001)
        id: String,
    },

    /// Apply to a job
    Apply {
        /// Job ID to apply to
        job_id: String,

        /// Resume filename to attach
        #[arg(short, long, default_value = "resume.pdf")]
        resume: String,
    },

    /// List your applications
    Applications,

    /// Advance an application one pipeline stage
    Advance {
        /// Application ID
        id: String,
    },

    /// Withdraw an application
    Withdraw {
        /// Application ID
        id: String,
    },

    /// List the candidate directory
    Candidates,

    /// Show analytics (jobs by location, pipeline distribution)
    Stats,

    /// Show jobs ranked against your preferences
    Rank {
        /// Number of jobs to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Manage the mock session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Show or update job preferences
    Prefs {
        /// Desired role
        #[arg(long)]
        role: Option<String>,

        /// Preferred location
        #[arg(long)]
        location: Option<String>,

        /// Minimum acceptable CTC in LPA
        #[arg(long)]
        min_lpa: Option<u32>,
    },

    /// Browse the job board interactively
    Browse,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Show session state
    Show,

    /// Mock sign in
    SignIn,

    /// Sign out
    SignOut,

    /// Switch role (candidate or recruiter)
    Role {
        #[arg(value_enum)]
        role: RoleArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RoleArg {
    Candidate,
    Recruiter,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Candidate => Role::Candidate,
            RoleArg::Recruiter => Role::Recruiter,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.data_dir {
        Some(dir) => JsonFileStore::at(dir)?,
        None => JsonFileStore::open()?,
    };
    let store_dir = store.dir().clone();
    let mut market = Marketplace::open(store);

    match cli.command {
        Commands::Init { force } => {
            // Check the store, not the in-memory collections: open() falls
            // back to seeds either way, and prefs or session may be the
            // only keys written so far.
            if market.store_has_data() && !force {
                println!("Store already has data. Use --force to reseed.");
            } else {
                market.reset();
                println!(
                    "Seeded {} jobs and {} candidates at {}.",
                    market.jobs().len(),
                    market.candidates().len(),
                    store_dir.display()
                );
            }
        }

        Commands::Jobs { location, skill } => {
            let jobs: Vec<_> = market
                .jobs()
                .iter()
                .filter(|j| match &location {
                    Some(l) => j.location.to_lowercase().contains(&l.to_lowercase()),
                    None => true,
                })
                .filter(|j| match &skill {
                    Some(s) => j.skills.iter().any(|k| k.eq_ignore_ascii_case(s)),
                    None => true,
                })
                .collect();

            if jobs.is_empty() {
                println!("No jobs found.");
            } else {
                println!(
                    "{:<8} {:<25} {:<18} {:<16} {:>8}",
                    "ID", "TITLE", "COMPANY", "LOCATION", "CTC(LPA)"
                );
                println!("{}", "-".repeat(78));
                for job in jobs {
                    println!(
                        "{:<8} {:<25} {:<18} {:<16} {:>8}",
                        job.id,
                        truncate(&job.title, 23),
                        truncate(&job.company, 16),
                        truncate(&job.location, 14),
                        job.salary
                    );
                }
            }
        }

        Commands::Show { id } => match market.job(&id) {
            Some(job) => {
                println!("Job {}", job.id);
                println!("Title: {}", job.title);
                println!("Company: {}", job.company);
                println!("Location: {}", job.location);
                println!("CTC (LPA): {}", job.salary);
                println!("Skills: {}", job.skills.join(", "));
                println!("\n{}", textwrap::fill(&job.description, 78));
            }
            None => {
                println!("Job '{}' not found.", id);
            }
        },

        Commands::Apply { job_id, resume } => match market.apply(&job_id, &resume) {
            Some(app) => {
                println!("Applied to {} at {} ({})", app.job_title, app.company, app.id);
            }
            None => {
                println!("Job '{}' not found.", job_id);
            }
        },

        Commands::Applications => {
            let apps = market.applications();
            if apps.is_empty() {
                println!("No applications yet.");
            } else {
                println!(
                    "{:<22} {:<18} {:<25} {:<12} {:<20}",
                    "ID", "COMPANY", "ROLE", "STATUS", "APPLIED AT"
                );
                println!("{}", "-".repeat(99));
                for app in apps {
                    println!(
                        "{:<22} {:<18} {:<25} {:<12} {:<20}",
                        app.id,
                        truncate(&app.company, 16),
                        truncate(&app.job_title, 23),
                        app.status,
                        truncate(&app.created_at, 19)
                    );
                }
            }
        }

        Commands::Advance { id } => match market.advance(&id) {
            Some(status) => {
                println!("Application {} is now {}.", id, status);
            }
            None => {
                println!("Application '{}' not found.", id);
            }
        },

        Commands::Withdraw { id } => {
            let snapshot = market
                .application(&id)
                .map(|a| (a.job_title.clone(), a.company.clone()));
            match snapshot {
                Some((title, company)) => {
                    market.withdraw(&id);
                    println!("Withdrew application for {} at {}.", title, company);
                }
                None => {
                    println!("Application '{}' not found.", id);
                }
            }
        }

        Commands::Candidates => {
            let candidates = market.candidates();
            if candidates.is_empty() {
                println!("No candidates found.");
            } else {
                println!(
                    "{:<8} {:<16} {:<36} {:>6}",
                    "ID", "NAME", "HEADLINE", "SCORE"
                );
                println!("{}", "-".repeat(68));
                for candidate in candidates {
                    println!(
                        "{:<8} {:<16} {:<36} {:>6}",
                        candidate.id,
                        truncate(&candidate.name, 14),
                        truncate(&candidate.headline, 34),
                        candidate.score
                    );
                }
            }
        }

        Commands::Stats => {
            println!("Jobs by location:");
            let by_location = analytics::jobs_by_location(market.jobs());
            if by_location.is_empty() {
                println!("  (no jobs)");
            } else {
                for (location, count) in &by_location {
                    println!("  {:<20} {:>4}", location, count);
                }
            }

            println!("\nApplication pipeline:");
            for (status, count) in analytics::pipeline_distribution(market.applications()) {
                println!("  {:<12} {:>4}", status.to_string(), count);
            }
        }

        Commands::Rank { limit } => {
            let ranked = market.rank_jobs(limit);
            if ranked.is_empty() {
                println!("No jobs to rank.");
            } else {
                println!(
                    "{:<5} {:<8} {:<25} {:<16} {:>8}",
                    "RANK", "ID", "TITLE", "LOCATION", "SCORE"
                );
                println!("{}", "-".repeat(66));
                for (i, (job, score)) in ranked.iter().enumerate() {
                    println!(
                        "{:<5} {:<8} {:<25} {:<16} {:>8.1}",
                        i + 1,
                        job.id,
                        truncate(&job.title, 23),
                        truncate(&job.location, 14),
                        score
                    );
                }
            }
        }

        Commands::Session { command } => match command {
            SessionCommands::Show => {
                let session = market.session();
                let state = if session.signed_in { "signed in" } else { "signed out" };
                println!("Session: {} as {}", state, session.role);
            }
            SessionCommands::SignIn => {
                market.sign_in();
                println!("Signed in.");
            }
            SessionCommands::SignOut => {
                market.sign_out();
                println!("Signed out.");
            }
            SessionCommands::Role { role } => {
                market.set_role(role.into());
                println!("Role set to {}.", market.session().role);
            }
        },

        Commands::Prefs {
            role,
            location,
            min_lpa,
        } => {
            if role.is_none() && location.is_none() && min_lpa.is_none() {
                let prefs = market.preferences();
                println!("Desired role: {}", prefs.desired_role.as_deref().unwrap_or("-"));
                println!("Location: {}", prefs.location.as_deref().unwrap_or("-"));
                match prefs.min_lpa {
                    Some(min) => println!("Minimum LPA: {}", min),
                    None => println!("Minimum LPA: -"),
                }
            } else {
                let current = market.preferences().clone();
                market.set_preferences(Preferences {
                    desired_role: role.or(current.desired_role),
                    location: location.or(current.location),
                    min_lpa: min_lpa.or(current.min_lpa),
                });
                println!("Preferences saved.");
            }
        }

        Commands::Browse => {
            tui::run_browse(&mut market)?;
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

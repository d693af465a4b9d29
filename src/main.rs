mod board;
mod catalog;
mod config;
mod filter;
mod logging;
mod models;
mod tui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use board::BoardState;
use catalog::Catalog;
use config::Config;
use filter::{FilterCriteria, Recency, SalaryBand};
use models::{JobId, JobPosting, WorkArrangement};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "PeopleOps job board - search, filter, and save openings")]
struct Cli {
    /// Start in dark theme (also JOBBOARD_DARK=1)
    #[arg(long, global = true)]
    dark: bool,

    /// Directory for log files (also JOBBOARD_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the board interactively (default)
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List jobs matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the matching postings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show job details
    Show {
        /// Job ID
        id: JobId,
    },
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Match against job title or company (case-insensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// Salary band (under-50k, 50k-75k, 75k-100k, 100k-150k, over-150k)
    #[arg(long)]
    salary: Option<SalaryBand>,

    /// Work arrangement (Remote, Hybrid, On-site)
    #[arg(short, long)]
    work: Option<WorkArrangement>,

    /// Posted within (today, last-3-days, last-week, last-month)
    #[arg(short, long)]
    posted: Option<Recency>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.unwrap_or_default(),
            salary_band: self.salary,
            work_arrangement: self.work,
            recency: self.posted,
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    criteria: &'a FilterCriteria,
    count: usize,
    jobs: Vec<&'a JobPosting>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.dark, cli.log_dir);
    let _log_guard = logging::init_or_warn(&config.log_dir);

    let catalog = Catalog::seeded();
    info!(jobs = catalog.len(), "catalog seeded");

    let command = cli.command.unwrap_or(Commands::Browse {
        filters: FilterArgs::default(),
    });

    match command {
        Commands::Browse { filters } => {
            let mut board = BoardState::with_criteria(filters.into_criteria());
            if config.dark_theme {
                board.toggle_theme();
            }
            tui::run_browse(&catalog, board)?;
        }

        Commands::List { filters, json } => {
            let board = BoardState::with_criteria(filters.into_criteria());
            let jobs = board.visible_jobs(&catalog);
            info!(criteria = ?board.criteria, matched = jobs.len(), "listing jobs");

            if json {
                let output = ListOutput {
                    criteria: &board.criteria,
                    count: jobs.len(),
                    jobs,
                };
                let rendered = serde_json::to_string_pretty(&output).context("Failed to serialize job list")?;
                println!("{}", rendered);
            } else {
                println!("Showing {} jobs", jobs.len());
                if !jobs.is_empty() {
                    println!(
                        "{:<4} {:<34} {:<20} {:<8} {:<15} {:<12}",
                        "ID", "TITLE", "COMPANY", "TYPE", "SALARY", "POSTED"
                    );
                    println!("{}", "-".repeat(98));
                    for job in jobs {
                        println!("{}", format_list_row(job));
                    }
                }
            }
        }

        Commands::Show { id } => match catalog.get(id) {
            Some(job) => {
                println!("Job #{}", job.id);
                println!("Title: {}", job.title);
                if job.featured {
                    println!("Featured");
                }
                println!("Company: {}", job.company);
                println!("Location: {}", job.location);
                println!("Type: {}", job.work_arrangement);
                println!("Salary: {}", job.salary_display);
                println!("Posted: {}", job.posted_display);
                println!("Tags: {}", job.tags.join(", "));
                println!("\n{}", textwrap::fill(&job.description, 80));
            }
            None => {
                println!("Job #{} not found.", id);
            }
        },
    }

    Ok(())
}

fn format_list_row(job: &JobPosting) -> String {
    let title = if job.featured {
        format!("{} *", truncate(&job.title, 30))
    } else {
        truncate(&job.title, 32)
    };
    format!(
        "{:<4} {:<34} {:<20} {:<8} {:<15} {:<12}",
        job.id,
        title,
        truncate(&job.company, 18),
        job.work_arrangement,
        job.salary_display,
        job.posted_display
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

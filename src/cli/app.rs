//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{query, skill, task};
use crate::storage::{GlobalConfig, Project};

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(author, version, about = "Local-first task tracking with network operations skills")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured `default_format`)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new opsdesk project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Run or inspect skills attached to tasks
    #[command(subcommand)]
    Skill(skill::SkillCommands),

    /// Rank every task by urgency, with reasoning per entry
    Prioritize,

    /// Produce a daily status summary
    Digest {
        /// Date for the summary header (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Team name for the summary header (defaults to config)
        #[arg(long)]
        team: Option<String>,
    },

    /// Show task counts overview
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => GlobalConfig::load()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Opsdesk starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .opsdesk directory at: {}", project.data_dir().display()),
            );
            output.success(&format!(
                "Initialized opsdesk project at {}",
                project.root().display()
            ));
        }

        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Skill(cmd) => skill::run(cmd, &output)?,

        Commands::Prioritize => {
            output.verbose("Ranking all stored tasks");
            skill::prioritize(&output)?
        }

        Commands::Digest { date, team } => {
            output.verbose_ctx(
                "digest",
                &format!("Building digest: date={:?}, team={:?}", date, team),
            );
            skill::digest(&output, date.as_deref(), team.as_deref())?
        }

        Commands::Status => {
            output.verbose("Gathering task counts");
            query::status(&output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

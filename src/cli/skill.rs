//! Skill CLI commands (run, output, prioritize, digest)

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{digest as build_digest, rank, TaskId, TaskSummary};
use crate::skills::{execute, render_daily_summary, render_priority_list};
use crate::storage::{Project, StoreError};

#[derive(Subcommand)]
pub enum SkillCommands {
    /// Execute the skill attached to a task and persist its output
    Run {
        /// Task ID
        id: String,
    },

    /// Print the stored output of the last skill run
    Output {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: SkillCommands, output: &Output) -> Result<()> {
    match cmd {
        SkillCommands::Run { id } => run_skill(output, &id),
        SkillCommands::Output { id } => show_output(output, &id),
    }
}

fn run_skill(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    let mut task = store.get(&id)?.ok_or(StoreError::NotFound(id))?;

    let kind = task
        .skill
        .ok_or_else(|| anyhow::anyhow!("Task {} has no skill attached", task.id))?;

    let payload = task
        .input_payload
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    output.verbose_ctx("skill", &format!("Running {} for {}", kind, task.id));

    let rendered = execute(
        kind,
        &payload,
        &project.config().project.scoring,
        Utc::now(),
    )?;

    task.set_output(serde_json::json!({
        "skill": kind.as_str(),
        "output": rendered,
    }));
    store.update(&task)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id.to_string(),
            "skill": kind.as_str(),
            "output": rendered,
        }));
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn show_output(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    let task = store.get(&id)?.ok_or(StoreError::NotFound(id))?;

    let payload = task
        .output_payload
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Task {} has no skill output yet", task.id))?;

    if output.is_json() {
        output.data(payload);
    } else {
        let text = payload
            .get("output")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        println!("{}", text);
    }

    Ok(())
}

/// Loads all stored tasks as snapshots, oldest first.
///
/// The store lists newest first; ranking and digest treat input order as
/// the stable tiebreak, and older tasks should win ties.
fn load_summaries(project: &Project) -> Result<Vec<TaskSummary>> {
    let mut tasks = project.task_store()?.list()?;
    tasks.reverse();
    Ok(tasks.iter().map(|t| t.summary()).collect())
}

/// Ranks every stored task and prints the priority list
pub fn prioritize(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let summaries = load_summaries(&project)?;

    if summaries.is_empty() {
        // The ranking core rejects empty input; an empty store is a normal
        // situation for the CLI, so translate instead of failing
        if output.is_json() {
            output.data(&serde_json::json!([]));
        } else {
            println!("No tasks to prioritize.");
        }
        return Ok(());
    }

    let ranking = rank(&summaries, &project.config().project.scoring)?;

    if output.is_json() {
        output.data(&ranking);
    } else {
        println!("{}", render_priority_list(&summaries, &ranking, Utc::now()));
    }

    Ok(())
}

/// Builds the daily status digest and prints it
pub fn digest(output: &Output, date: Option<&str>, team: Option<&str>) -> Result<()> {
    let project = Project::open_current()?;
    let summaries = load_summaries(&project)?;

    if summaries.is_empty() {
        if output.is_json() {
            output.data(&serde_json::json!(null));
        } else {
            println!("No tasks to summarize.");
        }
        return Ok(());
    }

    let config = &project.config().project;
    let result = build_digest(&summaries, config.digest_next_up)?;

    let now = Utc::now();
    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| now.format("%Y-%m-%d").to_string());
    let team = team.unwrap_or(&config.team_name);

    if output.is_json() {
        output.data(&serde_json::json!({
            "date": date,
            "team": team,
            "digest": result,
        }));
    } else {
        println!("{}", render_daily_summary(&result, &date, team, now));
    }

    Ok(())
}

//! Task CLI commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{parse_due, SkillKind, Task, TaskId, TaskPriority, TaskStatus};
use crate::storage::{Project, StoreError};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Examples:
    ///   opsdesk task add "Renew wildcard cert" --priority high --due 2026-04-01
    ///   opsdesk task add "Draft FCR" --skill fcr --input '{"purpose": "Open port 443"}'
    Add {
        /// Task title
        title: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Priority hint (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Skill to attach (incident, runbook, fcr, prioritizer, daily_summary)
        #[arg(long)]
        skill: Option<String>,

        /// JSON input payload for the attached skill
        #[arg(long)]
        input: Option<String>,
    },

    /// List tasks
    List {
        /// Filter by status (open, in_progress, blocked, done)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Update task fields
    Update {
        /// Task ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status (open, in_progress, blocked, done)
        #[arg(long)]
        status: Option<String>,

        /// New priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },

    /// Mark task as in progress
    Start {
        /// Task ID
        id: String,
    },

    /// Mark task as blocked
    Block {
        /// Task ID
        id: String,
    },

    /// Mark task as done
    Done {
        /// Task ID
        id: String,
    },

    /// Reopen a completed task
    Reopen {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
            skill,
            input,
        } => add_task(
            output,
            &title,
            description.as_deref(),
            priority.as_deref(),
            due.as_deref(),
            skill.as_deref(),
            input.as_deref(),
        ),
        TaskCommands::List { status } => list_tasks(output, status.as_deref()),
        TaskCommands::Show { id } => show_task(output, &id),
        TaskCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
        } => update_task(
            output,
            &id,
            title.as_deref(),
            description.as_deref(),
            status.as_deref(),
            priority.as_deref(),
            due.as_deref(),
        ),
        TaskCommands::Remove { id } => remove_task(output, &id),
        TaskCommands::Start { id } => transition(output, &id, Transition::Start),
        TaskCommands::Block { id } => transition(output, &id, Transition::Block),
        TaskCommands::Done { id } => transition(output, &id, Transition::Done),
        TaskCommands::Reopen { id } => transition(output, &id, Transition::Reopen),
    }
}

fn add_task(
    output: &Output,
    title: &str,
    description: Option<&str>,
    priority: Option<&str>,
    due: Option<&str>,
    skill: Option<&str>,
    input: Option<&str>,
) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let mut task = Task::new(TaskId::new(title, Utc::now()), title);

    if let Some(description) = description {
        task.set_description(description);
    }
    if let Some(priority) = priority {
        task.set_priority(Some(priority.parse::<TaskPriority>()?));
    }
    if let Some(due) = due {
        task.set_due(Some(parse_due(due)?));
    }
    if let Some(skill) = skill {
        let kind: SkillKind = skill.parse()?;
        let payload = input
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .map_err(|e| anyhow::anyhow!("Invalid JSON in --input: {}", e))?;
        task.set_skill(kind, payload);
    } else if input.is_some() {
        anyhow::bail!("--input requires --skill");
    }

    store.insert(&task)?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Created task: {} - {}", task.id, task.title));
    }

    Ok(())
}

fn list_tasks(output: &Output, status_filter: Option<&str>) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let status_filter = status_filter
        .map(|s| s.parse::<TaskStatus>())
        .transpose()?;

    let tasks: Vec<Task> = store
        .list()?
        .into_iter()
        .filter(|t| status_filter.map(|s| t.status == s).unwrap_or(true))
        .collect();

    if output.is_json() {
        output.data(&tasks);
    } else if tasks.is_empty() {
        match status_filter {
            Some(status) => println!("No {} tasks", status),
            None => println!("No tasks"),
        }
    } else {
        println!("{:<12} {:<12} {:<10} TITLE", "ID", "STATUS", "PRIORITY");
        println!("{}", "-".repeat(60));

        for task in &tasks {
            let priority = task.priority.map(|p| p.as_str()).unwrap_or("-");
            println!(
                "{:<12} {:<12} {:<10} {}",
                task.id.to_string(),
                task.status.as_str(),
                priority,
                task.title
            );
        }
    }

    Ok(())
}

fn show_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    let task = store.get(&id)?.ok_or(StoreError::NotFound(id))?;

    if output.is_json() {
        output.data(&task);
    } else {
        println!("Task: {}", task.id);
        println!("Title: {}", task.title);
        println!("Status: {}", task.status);
        if let Some(priority) = task.priority {
            println!("Priority: {}", priority);
        }
        if let Some(due) = task.due {
            println!("Due: {}", due.format("%Y-%m-%d"));
        }
        println!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M"));
        println!("Updated: {}", task.updated_at.format("%Y-%m-%d %H:%M"));

        if let Some(completed) = task.completed_at {
            println!("Completed: {}", completed.format("%Y-%m-%d %H:%M"));
        }

        if let Some(desc) = &task.description {
            println!("\nDescription:");
            println!("{}", desc);
        }

        if let Some(skill) = task.skill {
            println!("\nSkill: {}", skill);
            if task.input_payload.is_some() {
                println!("Input payload: set");
            }
            if task.output_payload.is_some() {
                println!("Output payload: set (see 'opsdesk skill output {}')", task.id);
            }
        }
    }

    Ok(())
}

fn update_task(
    output: &Output,
    id_str: &str,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
    priority: Option<&str>,
    due: Option<&str>,
) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    let mut task = store.get(&id)?.ok_or(StoreError::NotFound(id))?;

    if let Some(title) = title {
        task.set_title(title);
    }
    if let Some(description) = description {
        task.set_description(description);
    }
    if let Some(status) = status {
        task.set_status(status.parse::<TaskStatus>()?);
    }
    if let Some(priority) = priority {
        task.set_priority(Some(priority.parse::<TaskPriority>()?));
    }
    if let Some(due) = due {
        task.set_due(Some(parse_due(due)?));
    }

    store.update(&task)?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Updated task: {}", task.id));
    }

    Ok(())
}

fn remove_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    if !store.remove(&id)? {
        return Err(StoreError::NotFound(id).into());
    }

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": id.to_string() }));
    } else {
        output.success(&format!("Removed task: {}", id));
    }

    Ok(())
}

enum Transition {
    Start,
    Block,
    Done,
    Reopen,
}

fn transition(output: &Output, id_str: &str, transition: Transition) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let id: TaskId = id_str.parse()?;
    let mut task = store.get(&id)?.ok_or(StoreError::NotFound(id))?;

    let verb = match transition {
        Transition::Start => {
            task.start();
            "Started"
        }
        Transition::Block => {
            task.block();
            "Blocked"
        }
        Transition::Done => {
            task.complete();
            "Completed"
        }
        Transition::Reopen => {
            task.reopen();
            "Reopened"
        }
    };

    store.update(&task)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id.to_string(),
            "status": task.status,
            "completed_at": task.completed_at,
        }));
    } else {
        output.success(&format!("{} task: {}", verb, task.id));
    }

    Ok(())
}

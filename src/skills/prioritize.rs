//! Markdown rendering for the task prioritizer
//!
//! The ordering itself lives in [`crate::domain::rank`]; this module only
//! turns a ranking into a readable priority list.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{RankedTask, TaskPriority, TaskStatus, TaskSummary};

use super::render::timestamp;

fn priority_icon(priority: Option<TaskPriority>) -> &'static str {
    match priority {
        Some(TaskPriority::Critical) => "(!!)",
        Some(TaskPriority::High) => "(!)",
        Some(TaskPriority::Medium) => "(-)",
        Some(TaskPriority::Low) | None => "(.)",
    }
}

fn status_tag(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "[OPEN]",
        TaskStatus::InProgress => "[IN PROGRESS]",
        TaskStatus::Blocked => "[BLOCKED]",
        TaskStatus::Done => "[DONE]",
    }
}

/// Renders a ranked priority list as markdown.
///
/// `tasks` must be the snapshots the ranking was produced from; entries
/// are matched by id.
pub fn render_priority_list(
    tasks: &[TaskSummary],
    ranking: &[RankedTask],
    generated_at: DateTime<Utc>,
) -> String {
    let by_id: HashMap<_, _> = tasks.iter().map(|t| (&t.id, t)).collect();

    let mut lines = vec![
        "# Task Priority List".to_string(),
        String::new(),
        format!("**Generated:** {}", timestamp(generated_at)),
        format!("**Total Tasks:** {}", ranking.len()),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Prioritized Order".to_string(),
        String::new(),
    ];

    let mut counts = (0usize, 0usize, 0usize, 0usize); // blocked, in_progress, open, done

    for entry in ranking {
        let Some(task) = by_id.get(&entry.id) else {
            continue;
        };

        match task.status {
            TaskStatus::Blocked => counts.0 += 1,
            TaskStatus::InProgress => counts.1 += 1,
            TaskStatus::Open => counts.2 += 1,
            TaskStatus::Done => counts.3 += 1,
        }

        lines.push(format!(
            "{}. {} **{}** {}",
            entry.rank,
            priority_icon(task.priority),
            task.title,
            status_tag(task.status)
        ));
        lines.push(format!("   _Reason: {}_", entry.reason));
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(format!("- Blocked: {}", counts.0));
    lines.push(format!("- In Progress: {}", counts.1));
    lines.push(format!("- Open: {}", counts.2));
    lines.push(format!("- Completed: {}", counts.3));
    lines.push(String::new());
    lines.push("**Focus:** Start with task #1 and work down the list.".to_string());

    lines.join("\n")
}

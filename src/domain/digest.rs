//! Daily status digest
//!
//! Aggregates task snapshots into a manager-readable shape: counts by
//! status, completed and in-progress items, blocked items needing
//! attention, and a short "next up" list. Pure and deterministic,
//! sharing the input contract of the prioritizer.

use serde::Serialize;

use super::id::TaskId;
use super::summary::{validate, InvalidInput, TaskSummary};
use super::task::{TaskPriority, TaskStatus};

/// Task counts by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub blocked: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.open + self.in_progress + self.blocked + self.done
    }
}

/// A task reference carried in digest sections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestEntry {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl DigestEntry {
    fn from_summary(task: &TaskSummary) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            priority: task.priority,
        }
    }
}

/// Aggregate view over a task collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDigest {
    pub counts: StatusCounts,
    pub completed: Vec<DigestEntry>,
    pub in_progress: Vec<DigestEntry>,
    pub at_risk: Vec<DigestEntry>,
    pub next_up: Vec<DigestEntry>,
}

/// Builds the digest.
///
/// All sections keep input order. `next_up` holds at most `next_up_limit`
/// open tasks, preferring high/critical priority ones and falling back to
/// the first open tasks when none are urgent. Fails with [`InvalidInput`]
/// under the same conditions as ranking.
pub fn digest(tasks: &[TaskSummary], next_up_limit: usize) -> Result<StatusDigest, InvalidInput> {
    validate(tasks)?;

    let mut counts = StatusCounts::default();
    let mut completed = Vec::new();
    let mut in_progress = Vec::new();
    let mut at_risk = Vec::new();
    let mut open = Vec::new();

    for task in tasks {
        match task.status {
            TaskStatus::Open => {
                counts.open += 1;
                open.push(task);
            }
            TaskStatus::InProgress => {
                counts.in_progress += 1;
                in_progress.push(DigestEntry::from_summary(task));
            }
            TaskStatus::Blocked => {
                counts.blocked += 1;
                at_risk.push(DigestEntry::from_summary(task));
            }
            TaskStatus::Done => {
                counts.done += 1;
                completed.push(DigestEntry::from_summary(task));
            }
        }
    }

    let urgent: Vec<&TaskSummary> = open
        .iter()
        .filter(|t| t.priority.is_some_and(|p| p.is_urgent()))
        .copied()
        .collect();

    let next_up = if urgent.is_empty() { open } else { urgent }
        .into_iter()
        .take(next_up_limit)
        .map(DigestEntry::from_summary)
        .collect();

    Ok(StatusDigest {
        counts,
        completed,
        in_progress,
        at_risk,
        next_up,
    })
}

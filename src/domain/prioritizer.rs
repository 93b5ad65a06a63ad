//! Task prioritizer
//!
//! Produces a total order over task snapshots, with a short justification
//! per entry. Pure and deterministic: no I/O, no clock, no shared state,
//! safe to call from any number of threads at once.
//!
//! Ordering rules:
//! - Done tasks always come last, keeping their original relative order.
//! - Everything else sorts by priority weight first, due date second
//!   (earlier first, dated before undated), status weight third
//!   (blocked > in_progress > open, since blocked tasks need unblocking
//!   attention).
//! - Ties keep original input order. The stable tiebreak is a guaranteed,
//!   tested property, not an accident of the sort implementation.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::TaskId;
use super::summary::{validate, InvalidInput, TaskSummary};
use super::task::{TaskPriority, TaskStatus};

/// Scoring weights for the prioritizer.
///
/// Higher weight ranks earlier. The defaults are a starting point, not a
/// contract; projects can override them via `[scoring]` in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub blocked: u32,
    pub in_progress: u32,
    pub open: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            critical: 3,
            high: 2,
            medium: 1,
            low: 0,
            blocked: 2,
            in_progress: 1,
            open: 0,
        }
    }
}

impl ScoringWeights {
    /// Weight for an optional priority hint. Absent hints score like `low`.
    pub fn priority_weight(&self, priority: Option<TaskPriority>) -> u32 {
        match priority {
            Some(TaskPriority::Critical) => self.critical,
            Some(TaskPriority::High) => self.high,
            Some(TaskPriority::Medium) => self.medium,
            Some(TaskPriority::Low) | None => self.low,
        }
    }

    /// Weight for a task's status. Done tasks are partitioned out before
    /// scoring, so their weight never participates in ordering.
    pub fn status_weight(&self, status: TaskStatus) -> u32 {
        match status {
            TaskStatus::Blocked => self.blocked,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Open | TaskStatus::Done => self.open,
        }
    }
}

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTask {
    /// 1-based rank, strictly increasing, no ties
    pub rank: usize,

    /// The input task this entry refers to
    pub id: TaskId,

    /// Justification naming at least one factor present on the task
    pub reason: String,
}

/// Ranks tasks by urgency.
///
/// The output is a permutation of the input id set: same cardinality, each
/// id exactly once. Fails with [`InvalidInput`] before any ordering work
/// when the input is empty or contains duplicate ids.
pub fn rank(
    tasks: &[TaskSummary],
    weights: &ScoringWeights,
) -> Result<Vec<RankedTask>, InvalidInput> {
    validate(tasks)?;

    let (mut eligible, done): (Vec<&TaskSummary>, Vec<&TaskSummary>) =
        tasks.iter().partition(|t| !t.status.is_complete());

    // sort_by is stable: equal keys keep input order
    eligible.sort_by(|a, b| compare(a, b, weights));

    Ok(eligible
        .into_iter()
        .chain(done)
        .enumerate()
        .map(|(i, task)| RankedTask {
            rank: i + 1,
            id: task.id.clone(),
            reason: reasoning(task),
        })
        .collect())
}

fn compare(a: &TaskSummary, b: &TaskSummary, weights: &ScoringWeights) -> Ordering {
    weights
        .priority_weight(b.priority)
        .cmp(&weights.priority_weight(a.priority))
        .then_with(|| compare_due(a.due, b.due))
        .then_with(|| {
            weights
                .status_weight(b.status)
                .cmp(&weights.status_weight(a.status))
        })
}

/// Earlier due dates rank first; a dated task outranks an undated one.
fn compare_due(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn status_phrase(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Blocked => "blocked, needs unblocking",
        TaskStatus::InProgress => "already in progress",
        TaskStatus::Open => "ready to start",
        TaskStatus::Done => "completed",
    }
}

fn reasoning(task: &TaskSummary) -> String {
    if task.status.is_complete() {
        return "completed, scheduled last".to_string();
    }

    let mut reasons = Vec::new();

    if let Some(priority) = task.priority {
        reasons.push(format!("{} priority", priority));
    }
    if let Some(due) = task.due {
        reasons.push(format!("due {}", due.format("%Y-%m-%d")));
    }
    reasons.push(status_phrase(task.status).to_string());

    reasons.join(", ")
}

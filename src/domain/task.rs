//! Task domain model
//!
//! Tasks are the stored work items: a title, lifecycle status, optional
//! priority and due date, and an optionally attached skill with its
//! input/output payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;
use super::summary::{InvalidInput, TaskSummary};

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Returns true if this task is currently being worked on
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    /// Returns true if this task is waiting on something external
    pub fn is_blocked(&self) -> bool {
        matches!(self, TaskStatus::Blocked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(TaskStatus::Open),
            "in_progress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            "done" => Ok(TaskStatus::Done),
            other => Err(InvalidInput::UnknownStatus(other.to_string())),
        }
    }
}

/// Priority hint of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Returns true for priorities that should jump the queue
    pub fn is_urgent(&self) -> bool {
        matches!(self, TaskPriority::High | TaskPriority::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "critical" => Ok(TaskPriority::Critical),
            other => Err(InvalidInput::UnknownPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown skill: '{0}' (expected incident, runbook, fcr, prioritizer, daily_summary)")]
pub struct UnknownSkill(String);

/// Kind of text-generation skill a task can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Incident,
    Runbook,
    Fcr,
    Prioritizer,
    DailySummary,
}

impl SkillKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Incident => "incident",
            SkillKind::Runbook => "runbook",
            SkillKind::Fcr => "fcr",
            SkillKind::Prioritizer => "prioritizer",
            SkillKind::DailySummary => "daily_summary",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillKind {
    type Err = UnknownSkill;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "incident" => Ok(SkillKind::Incident),
            "runbook" => Ok(SkillKind::Runbook),
            "fcr" => Ok(SkillKind::Fcr),
            "prioritizer" => Ok(SkillKind::Prioritizer),
            "daily_summary" => Ok(SkillKind::DailySummary),
            other => Err(UnknownSkill(other.to_string())),
        }
    }
}

/// A stored task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Optional priority hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// Optional due timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,

    /// When the task was completed (if done)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Skill attached to this task, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillKind>,

    /// Input payload for the attached skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_payload: Option<serde_json::Value>,

    /// Output produced by the last skill run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_payload: Option<serde_json::Value>,
}

impl Task {
    /// Creates a new open task with the given ID and title
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            status: TaskStatus::Open,
            priority: None,
            due: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            description: None,
            skill: None,
            input_payload: None,
            output_payload: None,
        }
    }

    /// Transitions to in_progress status (from open or blocked)
    pub fn start(&mut self) {
        if matches!(self.status, TaskStatus::Open | TaskStatus::Blocked) {
            self.status = TaskStatus::InProgress;
            self.updated_at = Utc::now();
        }
    }

    /// Transitions to blocked status
    pub fn block(&mut self) {
        if !self.status.is_complete() && self.status != TaskStatus::Blocked {
            self.status = TaskStatus::Blocked;
            self.updated_at = Utc::now();
        }
    }

    /// Transitions to done status
    pub fn complete(&mut self) {
        if !self.status.is_complete() {
            self.status = TaskStatus::Done;
            let now = Utc::now();
            self.updated_at = now;
            self.completed_at = Some(now);
        }
    }

    /// Transitions back to open status
    pub fn reopen(&mut self) {
        if self.status.is_complete() {
            self.status = TaskStatus::Open;
            self.updated_at = Utc::now();
            self.completed_at = None;
        }
    }

    /// Sets the status directly, keeping completion bookkeeping consistent.
    ///
    /// Unlike the guarded transitions above, this applies any status.
    pub fn set_status(&mut self, status: TaskStatus) {
        if self.status == status {
            return;
        }
        let now = Utc::now();
        self.status = status;
        self.updated_at = now;
        self.completed_at = if status.is_complete() { Some(now) } else { None };
    }

    /// Sets the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Sets the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
        self.updated_at = Utc::now();
    }

    /// Sets the priority hint
    pub fn set_priority(&mut self, priority: Option<TaskPriority>) {
        self.priority = priority;
        self.updated_at = Utc::now();
    }

    /// Sets the due timestamp
    pub fn set_due(&mut self, due: Option<DateTime<Utc>>) {
        self.due = due;
        self.updated_at = Utc::now();
    }

    /// Attaches a skill with its input payload
    pub fn set_skill(&mut self, skill: SkillKind, input: Option<serde_json::Value>) {
        self.skill = Some(skill);
        self.input_payload = input;
        self.updated_at = Utc::now();
    }

    /// Records the output of a skill run
    pub fn set_output(&mut self, output: serde_json::Value) {
        self.output_payload = Some(output);
        self.updated_at = Utc::now();
    }

    /// Takes an immutable snapshot for ranking/digest logic
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            priority: self.priority,
            due: self.due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(title: &str) -> Task {
        let id = TaskId::new(title, Utc::now());
        Task::new(id, title)
    }

    #[test]
    fn new_task_is_open() {
        let task = make_task("Check firewall logs");
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.priority.is_none());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn status_transitions() {
        let mut task = make_task("Check firewall logs");

        task.start();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.status.is_active());

        task.block();
        assert_eq!(task.status, TaskStatus::Blocked);

        task.start();
        assert_eq!(task.status, TaskStatus::InProgress);

        task.complete();
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.status.is_complete());
        assert!(task.completed_at.is_some());

        task.reopen();
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn set_status_applies_any_status() {
        let mut task = make_task("Swap line card");

        task.block();
        task.set_status(TaskStatus::Open);
        assert_eq!(task.status, TaskStatus::Open);

        task.set_status(TaskStatus::Done);
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed_at.is_some());

        task.set_status(TaskStatus::InProgress);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn complete_task_cannot_be_blocked() {
        let mut task = make_task("Archive old tickets");
        task.complete();
        task.block();
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn status_parses_known_values() {
        assert_eq!("open".parse::<TaskStatus>().unwrap(), TaskStatus::Open);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("blocked".parse::<TaskStatus>().unwrap(), TaskStatus::Blocked);
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    }

    #[test]
    fn status_rejects_unknown_values() {
        let err = "todo".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err, InvalidInput::UnknownStatus("todo".to_string()));
    }

    #[test]
    fn priority_parses_and_orders() {
        assert_eq!("critical".parse::<TaskPriority>().unwrap(), TaskPriority::Critical);
        assert!(TaskPriority::Critical > TaskPriority::High);
        assert!(TaskPriority::High.is_urgent());
        assert!(!TaskPriority::Medium.is_urgent());
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn skill_kind_roundtrip() {
        for kind in [
            SkillKind::Incident,
            SkillKind::Runbook,
            SkillKind::Fcr,
            SkillKind::Prioritizer,
            SkillKind::DailySummary,
        ] {
            assert_eq!(kind.as_str().parse::<SkillKind>().unwrap(), kind);
        }
        assert!("pager".parse::<SkillKind>().is_err());
    }

    #[test]
    fn summary_snapshot_matches_task() {
        let mut task = make_task("Renew SSL cert");
        task.set_priority(Some(TaskPriority::High));
        task.block();

        let summary = task.summary();
        assert_eq!(summary.id, task.id);
        assert_eq!(summary.title, task.title);
        assert_eq!(summary.status, TaskStatus::Blocked);
        assert_eq!(summary.priority, Some(TaskPriority::High));
    }

    #[test]
    fn serde_roundtrip() {
        let mut task = make_task("Renew SSL cert");
        task.set_description("Expires end of month");
        task.set_skill(
            SkillKind::Fcr,
            Some(serde_json::json!({"purpose": "Renew certificate"})),
        );

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(task, parsed);
    }

    #[test]
    fn updated_at_changes_on_modifications() {
        let mut task = make_task("Check BGP sessions");
        let created = task.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        task.start();

        assert!(task.updated_at > created);
    }
}

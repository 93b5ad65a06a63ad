//! Task snapshots consumed by the ranking and digest logic
//!
//! A [`TaskSummary`] is an immutable view of a task taken at call time.
//! The ranking and digest functions share one input contract, checked by
//! [`validate`] before any ordering work begins.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TaskId;
use super::task::{TaskPriority, TaskStatus};

/// Rejected ranking/digest input.
///
/// Every condition is detected up front; no partial results are produced.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("no tasks supplied")]
    Empty,

    #[error("duplicate task id: {0}")]
    DuplicateId(TaskId),

    #[error("unrecognized status: '{0}' (expected open, in_progress, blocked, done)")]
    UnknownStatus(String),

    #[error("unrecognized priority: '{0}' (expected low, medium, high, critical)")]
    UnknownPriority(String),

    #[error("task '{0}' has no status")]
    MissingStatus(String),

    #[error("invalid task id in payload: '{0}'")]
    BadId(String),

    #[error("unparseable due date: '{0}' (expected RFC 3339 or YYYY-MM-DD)")]
    BadDueDate(String),
}

/// Immutable snapshot of a task, the unit of ranking and digest input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Opaque identifier referenced by ranking output
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Current status (always present)
    pub status: TaskStatus,

    /// Optional priority hint; absent hints score as the lowest weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// Optional due timestamp; absent is the weakest urgency signal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
}

impl TaskSummary {
    /// Creates a snapshot with no priority hint or due date
    pub fn new(id: TaskId, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            priority: None,
            due: None,
        }
    }
}

/// Checks the shared input contract: non-empty input, unique ids.
pub fn validate(tasks: &[TaskSummary]) -> Result<(), InvalidInput> {
    if tasks.is_empty() {
        return Err(InvalidInput::Empty);
    }

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(&task.id) {
            return Err(InvalidInput::DuplicateId(task.id.clone()));
        }
    }

    Ok(())
}

/// Parses snapshots out of a loose skill payload (`{"tasks": [...]}`).
///
/// Each entry must carry a `status`; `priority` and `due` are optional and
/// default to absent rather than to a silent guess. Entries may supply an
/// `id` in canonical `t-{hash}` form; entries without one get an id derived
/// from title + position, so identical payloads parse identically.
pub fn summaries_from_payload(payload: &serde_json::Value) -> Result<Vec<TaskSummary>, InvalidInput> {
    let entries = payload
        .get("tasks")
        .and_then(|v| v.as_array())
        .ok_or(InvalidInput::Empty)?;

    let mut out = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let title = entry
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled")
            .to_string();

        let status: TaskStatus = entry
            .get("status")
            .and_then(|v| v.as_str())
            .ok_or_else(|| InvalidInput::MissingStatus(title.clone()))?
            .parse()?;

        let priority = entry
            .get("priority")
            .and_then(|v| v.as_str())
            .map(|s| s.parse::<TaskPriority>())
            .transpose()?;

        let due = entry
            .get("due")
            .and_then(|v| v.as_str())
            .map(parse_due)
            .transpose()?;

        let id = match entry.get("id").and_then(|v| v.as_str()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| InvalidInput::BadId(raw.to_string()))?,
            None => TaskId::derived(&format!("{}#{}", title, index)),
        };

        out.push(TaskSummary {
            id,
            title,
            status,
            priority,
            due,
        });
    }

    Ok(out)
}

pub(crate) fn parse_due(raw: &str) -> Result<DateTime<Utc>, InvalidInput> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .ok_or_else(|| InvalidInput::BadDueDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(seed: &str, status: TaskStatus) -> TaskSummary {
        TaskSummary::new(TaskId::derived(seed), seed, status)
    }

    #[test]
    fn validate_rejects_empty_input() {
        assert_eq!(validate(&[]), Err(InvalidInput::Empty));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let a = summary("a", TaskStatus::Open);
        let dup = TaskSummary::new(a.id.clone(), "other title", TaskStatus::Done);

        let err = validate(&[a.clone(), dup]).unwrap_err();
        assert_eq!(err, InvalidInput::DuplicateId(a.id));
    }

    #[test]
    fn validate_accepts_distinct_ids() {
        let tasks = vec![
            summary("a", TaskStatus::Open),
            summary("b", TaskStatus::Blocked),
        ];
        assert!(validate(&tasks).is_ok());
    }

    #[test]
    fn payload_parses_full_entries() {
        let payload = json!({
            "tasks": [
                {"title": "Patch firewall", "status": "open", "priority": "critical", "due": "2026-03-01"},
                {"title": "Audit VLANs", "status": "blocked"},
            ]
        });

        let parsed = summaries_from_payload(&payload).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].priority, Some(TaskPriority::Critical));
        assert!(parsed[0].due.is_some());
        assert_eq!(parsed[1].status, TaskStatus::Blocked);
        assert!(parsed[1].priority.is_none());
    }

    #[test]
    fn payload_parsing_is_deterministic() {
        let payload = json!({
            "tasks": [
                {"title": "Patch firewall", "status": "open"},
                {"title": "Patch firewall", "status": "open"},
            ]
        });

        let first = summaries_from_payload(&payload).unwrap();
        let second = summaries_from_payload(&payload).unwrap();

        assert_eq!(first, second);
        // Same title at different positions still gets distinct ids
        assert_ne!(first[0].id, first[1].id);
    }

    #[test]
    fn payload_without_tasks_is_empty_input() {
        assert_eq!(summaries_from_payload(&json!({})), Err(InvalidInput::Empty));
        // An empty array passes parsing; validate() rejects it downstream
        assert_eq!(summaries_from_payload(&json!({"tasks": []})), Ok(vec![]));
    }

    #[test]
    fn payload_rejects_missing_status() {
        let payload = json!({"tasks": [{"title": "No status"}]});
        assert_eq!(
            summaries_from_payload(&payload),
            Err(InvalidInput::MissingStatus("No status".to_string()))
        );
    }

    #[test]
    fn payload_rejects_unknown_status() {
        let payload = json!({"tasks": [{"title": "Bad", "status": "todo"}]});
        assert_eq!(
            summaries_from_payload(&payload),
            Err(InvalidInput::UnknownStatus("todo".to_string()))
        );
    }

    #[test]
    fn payload_rejects_unknown_priority() {
        let payload = json!({"tasks": [{"title": "Bad", "status": "open", "priority": "urgent"}]});
        assert_eq!(
            summaries_from_payload(&payload),
            Err(InvalidInput::UnknownPriority("urgent".to_string()))
        );
    }

    #[test]
    fn payload_rejects_malformed_id() {
        let payload = json!({"tasks": [{"id": "task-1", "title": "Bad id", "status": "open"}]});
        assert_eq!(
            summaries_from_payload(&payload),
            Err(InvalidInput::BadId("task-1".to_string()))
        );
    }

    #[test]
    fn payload_accepts_canonical_id() {
        let id = TaskId::derived("seed");
        let payload = json!({"tasks": [{"id": id.to_string(), "title": "Has id", "status": "open"}]});

        let parsed = summaries_from_payload(&payload).unwrap();
        assert_eq!(parsed[0].id, id);
    }

    #[test]
    fn payload_rejects_bad_due_date() {
        let payload = json!({"tasks": [{"title": "Bad due", "status": "open", "due": "next week"}]});
        assert_eq!(
            summaries_from_payload(&payload),
            Err(InvalidInput::BadDueDate("next week".to_string()))
        );
    }

    #[test]
    fn due_accepts_rfc3339_and_plain_dates() {
        assert!(parse_due("2026-03-01T12:30:00Z").is_ok());
        assert!(parse_due("2026-03-01").is_ok());
        assert!(parse_due("03/01/2026").is_err());
    }
}

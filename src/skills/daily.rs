//! Markdown rendering for the daily status digest
//!
//! The aggregation lives in [`crate::domain::digest`]; this module turns
//! a digest into the manager-ready summary format.

use chrono::{DateTime, Utc};

use crate::domain::{DigestEntry, StatusDigest};

use super::render::timestamp;

fn entry_line(entry: &DigestEntry) -> String {
    match entry.priority {
        Some(p) if p.is_urgent() => {
            format!("- {} [{}]", entry.title, p.as_str().to_uppercase())
        }
        _ => format!("- {}", entry.title),
    }
}

fn section(lines: &mut Vec<String>, heading: &str, entries: &[DigestEntry], empty_note: &str) {
    lines.push(format!("## {}", heading));
    if entries.is_empty() {
        lines.push(format!("- _{}_", empty_note));
    } else {
        for entry in entries {
            lines.push(entry_line(entry));
        }
    }
    lines.push(String::new());
}

/// Renders a daily status summary as markdown
pub fn render_daily_summary(
    digest: &StatusDigest,
    date: &str,
    team_name: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        format!("# Daily Status Summary - {}", team_name),
        String::new(),
        format!("**Date:** {}", date),
        format!("**Generated:** {}", timestamp(generated_at)),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    section(&mut lines, "Completed", &digest.completed, "No tasks completed");
    section(&mut lines, "In Progress", &digest.in_progress, "No tasks in progress");
    section(&mut lines, "Blocked", &digest.at_risk, "No blockers");
    section(&mut lines, "Next Up", &digest.next_up, "No pending tasks");

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## Quick Stats".to_string());
    lines.push("| Status | Count |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Completed | {} |", digest.counts.done));
    lines.push(format!("| In Progress | {} |", digest.counts.in_progress));
    lines.push(format!("| Blocked | {} |", digest.counts.blocked));
    lines.push(format!("| Open | {} |", digest.counts.open));
    lines.push(format!("| **Total** | **{}** |", digest.counts.total()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{digest, TaskId, TaskPriority, TaskStatus, TaskSummary};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn summary(seed: &str, status: TaskStatus, priority: Option<TaskPriority>) -> TaskSummary {
        let mut s = TaskSummary::new(TaskId::derived(seed), seed, status);
        s.priority = priority;
        s
    }

    #[test]
    fn renders_all_sections() {
        let tasks = vec![
            summary("Shipped the patch", TaskStatus::Done, None),
            summary("Investigating alerts", TaskStatus::InProgress, Some(TaskPriority::High)),
            summary("Waiting on carrier", TaskStatus::Blocked, None),
            summary("Renew certs", TaskStatus::Open, Some(TaskPriority::Critical)),
        ];
        let d = digest(&tasks, 3).unwrap();

        let output = render_daily_summary(&d, "2026-03-01", "Network Operations", at());

        assert!(output.contains("# Daily Status Summary - Network Operations"));
        assert!(output.contains("**Date:** 2026-03-01"));
        assert!(output.contains("- Shipped the patch"));
        assert!(output.contains("- Investigating alerts [HIGH]"));
        assert!(output.contains("- Waiting on carrier"));
        assert!(output.contains("- Renew certs [CRITICAL]"));
        assert!(output.contains("| **Total** | **4** |"));
    }

    #[test]
    fn empty_sections_carry_placeholders() {
        let tasks = vec![summary("Only open task", TaskStatus::Open, None)];
        let d = digest(&tasks, 3).unwrap();

        let output = render_daily_summary(&d, "2026-03-01", "NetOps", at());

        assert!(output.contains("- _No tasks completed_"));
        assert!(output.contains("- _No tasks in progress_"));
        assert!(output.contains("- _No blockers_"));
        assert!(output.contains("- Only open task"));
    }

    #[test]
    fn non_urgent_priority_has_no_tag() {
        let tasks = vec![summary("Routine work", TaskStatus::InProgress, Some(TaskPriority::Medium))];
        let d = digest(&tasks, 3).unwrap();

        let output = render_daily_summary(&d, "2026-03-01", "NetOps", at());
        assert!(output.contains("- Routine work\n"));
        assert!(!output.contains("[MEDIUM]"));
    }
}

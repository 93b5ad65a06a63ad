//! # Text-Generation Skills
//!
//! Skills turn a small typed input into ready-to-send markdown.
//!
//! | Skill | Input | Output |
//! |-------|-------|--------|
//! | `incident` | title + impact summary | audience-specific incident update |
//! | `runbook` | domain + symptom | safe troubleshooting runbook |
//! | `fcr` | change purpose | FCR section content |
//! | `prioritizer` | task list | ranked priority list with reasoning |
//! | `daily_summary` | task list | manager-ready daily digest |
//!
//! Execution is deterministic: every renderer takes the timestamp to stamp
//! on the output as an argument instead of reading the clock itself.

mod render;
mod incident;
mod runbook;
mod fcr;
mod prioritize;
mod daily;

pub use incident::{Audience, IncidentInput, IncidentStatus, Severity};
pub use runbook::{available_domains, symptoms_for_domain, AccessMode, RunbookInput};
pub use fcr::{ChangeType, Direction, FcrInput, RiskLevel, RuleCount};
pub use prioritize::render_priority_list;
pub use daily::render_daily_summary;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    digest, rank, summaries_from_payload, InvalidInput, ScoringWeights, SkillKind,
};

/// Number of "next up" entries a payload-driven digest carries unless the
/// payload overrides it.
const DEFAULT_NEXT_UP: usize = 3;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error(transparent)]
    Input(#[from] InvalidInput),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("no playbook for domain '{domain}' (available: {available})")]
    UnknownDomain { domain: String, available: String },

    #[error("unknown symptom '{symptom}' for domain '{domain}' (available: {available})")]
    UnknownSymptom {
        domain: String,
        symptom: String,
        available: String,
    },
}

/// Executes a skill over its JSON input payload, returning rendered markdown.
///
/// `generated_at` is stamped into the output; callers pass `Utc::now()`.
pub fn execute(
    kind: SkillKind,
    payload: &serde_json::Value,
    weights: &ScoringWeights,
    generated_at: DateTime<Utc>,
) -> Result<String, SkillError> {
    match kind {
        SkillKind::Incident => {
            let input: IncidentInput = serde_json::from_value(payload.clone())?;
            incident::generate(&input, generated_at)
        }
        SkillKind::Runbook => {
            let input: RunbookInput = serde_json::from_value(payload.clone())?;
            runbook::generate(&input, generated_at)
        }
        SkillKind::Fcr => {
            let input: FcrInput = serde_json::from_value(payload.clone())?;
            fcr::generate(&input, generated_at)
        }
        SkillKind::Prioritizer => {
            let tasks = summaries_from_payload(payload)?;
            let ranking = rank(&tasks, weights)?;
            Ok(render_priority_list(&tasks, &ranking, generated_at))
        }
        SkillKind::DailySummary => {
            let tasks = summaries_from_payload(payload)?;
            let next_up = payload
                .get("next_up")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
                .unwrap_or(DEFAULT_NEXT_UP);
            let summary = digest(&tasks, next_up)?;

            let date = payload
                .get("date")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| generated_at.format("%Y-%m-%d").to_string());
            let team = payload
                .get("team_name")
                .and_then(|v| v.as_str())
                .unwrap_or("Network Operations");

            Ok(render_daily_summary(&summary, &date, team, generated_at))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn dispatches_incident() {
        let payload = json!({
            "incident_title": "Core Router Reboot",
            "impact_summary": "Users in Building A experiencing intermittent connectivity",
        });

        let output = execute(
            SkillKind::Incident,
            &payload,
            &ScoringWeights::default(),
            at(),
        )
        .unwrap();

        assert!(output.contains("Core Router Reboot"));
        assert!(output.contains("Building A"));
        assert!(output.contains("Investigating"));
    }

    #[test]
    fn dispatches_prioritizer() {
        let payload = json!({
            "tasks": [
                {"title": "Low task", "status": "open", "priority": "low"},
                {"title": "Hot task", "status": "open", "priority": "critical"},
            ]
        });

        let output = execute(
            SkillKind::Prioritizer,
            &payload,
            &ScoringWeights::default(),
            at(),
        )
        .unwrap();

        let hot = output.find("Hot task").unwrap();
        let low = output.find("Low task").unwrap();
        assert!(hot < low);
    }

    #[test]
    fn dispatches_daily_summary_with_defaults() {
        let payload = json!({
            "tasks": [
                {"title": "Done thing", "status": "done"},
                {"title": "Stuck thing", "status": "blocked"},
            ]
        });

        let output = execute(
            SkillKind::DailySummary,
            &payload,
            &ScoringWeights::default(),
            at(),
        )
        .unwrap();

        assert!(output.contains("Network Operations"));
        assert!(output.contains("2026-03-01"));
        assert!(output.contains("Done thing"));
        assert!(output.contains("Stuck thing"));
    }

    #[test]
    fn prioritizer_surfaces_invalid_input() {
        let payload = json!({"tasks": [{"title": "Bad", "status": "todo"}]});

        let err = execute(
            SkillKind::Prioritizer,
            &payload,
            &ScoringWeights::default(),
            at(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SkillError::Input(InvalidInput::UnknownStatus(_))
        ));
    }

    #[test]
    fn empty_task_list_is_invalid_input() {
        let payload = json!({"tasks": []});

        let err = execute(
            SkillKind::DailySummary,
            &payload,
            &ScoringWeights::default(),
            at(),
        )
        .unwrap_err();

        assert!(matches!(err, SkillError::Input(InvalidInput::Empty)));
    }
}

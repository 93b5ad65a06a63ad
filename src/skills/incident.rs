//! Incident update composer
//!
//! Generates ready-to-send incident updates from two required fields
//! (title, impact summary). Everything else is auto-filled: next steps
//! from the current status, next-update time from severity, and an
//! evidence checklist when no evidence was collected yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::render::{bullet_list, checkbox_list, numbered_list, timestamp};
use super::SkillError;

/// Target audience for the update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[default]
    Manager,
    Client,
}

/// Incident severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Severity {
    P1,
    #[default]
    P2,
    P3,
    P4,
}

impl Severity {
    /// Default interval before the next update goes out
    pub fn next_update_time(&self) -> &'static str {
        match self {
            Severity::P1 => "30 minutes",
            Severity::P2 => "1 hour",
            Severity::P3 => "2 hours",
            Severity::P4 => "4 hours",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::P1 => f.write_str("P1"),
            Severity::P2 => f.write_str("P2"),
            Severity::P3 => f.write_str("P3"),
            Severity::P4 => f.write_str("P4"),
        }
    }
}

/// Incident lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Investigating,
    Identified,
    Mitigating,
    Resolved,
}

impl IncidentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "Investigating",
            IncidentStatus::Identified => "Identified",
            IncidentStatus::Mitigating => "Mitigating",
            IncidentStatus::Resolved => "Resolved",
        }
    }

    /// Auto-generated next steps for this status
    pub fn next_steps(&self) -> &'static [&'static str] {
        match self {
            IncidentStatus::Investigating => &[
                "Continue analyzing logs and alerts",
                "Gather additional evidence",
                "Identify root cause",
            ],
            IncidentStatus::Identified => &[
                "Implement fix",
                "Test in staging environment",
                "Schedule production deployment",
            ],
            IncidentStatus::Mitigating => &[
                "Monitor service recovery",
                "Validate fix effectiveness",
                "Document resolution steps",
            ],
            IncidentStatus::Resolved => &[
                "Complete post-incident documentation",
                "Schedule post-mortem meeting",
                "Update runbooks if needed",
            ],
        }
    }
}

/// Checklist suggested when no evidence has been collected yet
const EVIDENCE_CHECKLIST: &[&str] = &[
    "Screenshots of error messages/alerts",
    "Relevant log entries with timestamps",
    "Timeline of events",
];

/// Input for the incident update skill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentInput {
    pub incident_title: String,
    pub impact_summary: String,
    pub audience: Audience,
    pub severity: Severity,
    pub current_status: IncidentStatus,
    pub next_update_time: Option<String>,
    pub checks_done: Vec<String>,
    pub evidence: Vec<String>,
}

impl IncidentInput {
    fn validate(&self) -> Result<(), SkillError> {
        if self.incident_title.trim().is_empty() {
            return Err(SkillError::MissingField("incident_title"));
        }
        if self.impact_summary.trim().is_empty() {
            return Err(SkillError::MissingField("impact_summary"));
        }
        Ok(())
    }
}

/// Generates an incident update for the configured audience
pub fn generate(input: &IncidentInput, generated_at: DateTime<Utc>) -> Result<String, SkillError> {
    input.validate()?;

    let next_update = input
        .next_update_time
        .clone()
        .unwrap_or_else(|| input.severity.next_update_time().to_string());

    let rendered = match input.audience {
        Audience::Manager => render_manager(input, &next_update, generated_at),
        Audience::Client => render_client(input, &next_update, generated_at),
    };

    Ok(rendered)
}

fn render_manager(input: &IncidentInput, next_update: &str, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("# Incident Update: {}", input.incident_title),
        String::new(),
        format!(
            "**Severity:** {} | **Status:** {}",
            input.severity,
            input.current_status.label()
        ),
        format!("**Generated:** {}", timestamp(generated_at)),
        String::new(),
        "## Impact Summary".to_string(),
        input.impact_summary.clone(),
        String::new(),
    ];

    if !input.checks_done.is_empty() {
        lines.push("## Diagnostic Checks Completed".to_string());
        lines.push(bullet_list(&input.checks_done));
        lines.push(String::new());
    }

    if input.evidence.is_empty() {
        lines.push("## Evidence To Collect".to_string());
        lines.push(checkbox_list(EVIDENCE_CHECKLIST));
    } else {
        lines.push("## Evidence Collected".to_string());
        lines.push(bullet_list(&input.evidence));
    }
    lines.push(String::new());

    lines.push("## Next Steps".to_string());
    lines.push(numbered_list(input.current_status.next_steps()));
    lines.push(String::new());
    lines.push(format!("**Next Update:** {}", next_update));

    lines.join("\n")
}

fn render_client(input: &IncidentInput, next_update: &str, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("# Service Update: {}", input.incident_title),
        String::new(),
        format!("**Status:** {}", input.current_status.label()),
        format!("**Updated:** {}", timestamp(generated_at)),
        String::new(),
        "## Current Situation".to_string(),
        input.impact_summary.clone(),
        String::new(),
        "## What We're Doing".to_string(),
    ];

    // Clients only get the first two steps; internal detail stays internal
    for step in input.current_status.next_steps().iter().take(2) {
        lines.push(format!("- {}", step));
    }

    lines.push(String::new());
    lines.push(format!(
        "We will provide another update in {}.",
        next_update
    ));
    lines.push(String::new());
    lines.push("Thank you for your patience.".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn basic_input() -> IncidentInput {
        IncidentInput {
            incident_title: "Core Router Reboot".to_string(),
            impact_summary: "Users in Building A experiencing intermittent connectivity"
                .to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn basic_update_has_defaults() {
        let output = generate(&basic_input(), at()).unwrap();

        assert!(output.contains("Core Router Reboot"));
        assert!(output.contains("Building A"));
        assert!(output.contains("**Severity:** P2"));
        assert!(output.contains("Investigating"));
        assert!(output.contains("**Next Update:** 1 hour"));
        // No evidence supplied, so the checklist appears
        assert!(output.contains("Evidence To Collect"));
    }

    #[test]
    fn missing_title_is_rejected() {
        let input = IncidentInput {
            impact_summary: "impact".to_string(),
            ..Default::default()
        };

        let err = generate(&input, at()).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("incident_title")));
    }

    #[test]
    fn whitespace_impact_is_rejected() {
        let input = IncidentInput {
            incident_title: "Title".to_string(),
            impact_summary: "   ".to_string(),
            ..Default::default()
        };

        let err = generate(&input, at()).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("impact_summary")));
    }

    #[test]
    fn provided_evidence_replaces_checklist() {
        let mut input = basic_input();
        input.severity = Severity::P1;
        input.evidence = vec![
            "Screenshot of deny logs".to_string(),
            "User ticket #12345".to_string(),
        ];

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("P1"));
        assert!(output.contains("Evidence Collected"));
        assert!(output.contains("Screenshot of deny logs"));
        assert!(!output.contains("Evidence To Collect"));
        assert!(output.contains("**Next Update:** 30 minutes"));
    }

    #[test]
    fn checks_done_section_appears_when_present() {
        let mut input = basic_input();
        input.checks_done = vec!["Verified interface status".to_string()];

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("Diagnostic Checks Completed"));
        assert!(output.contains("Verified interface status"));
    }

    #[test]
    fn client_update_is_softer() {
        let mut input = basic_input();
        input.audience = Audience::Client;

        let output = generate(&input, at()).unwrap();
        assert!(output.starts_with("# Service Update:"));
        assert!(output.contains("Thank you for your patience."));
        // Internal sections stay out of client updates
        assert!(!output.contains("Severity"));
        assert!(!output.contains("Evidence"));
    }

    #[test]
    fn explicit_next_update_wins() {
        let mut input = basic_input();
        input.next_update_time = Some("15 minutes".to_string());

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("**Next Update:** 15 minutes"));
    }

    #[test]
    fn resolved_status_changes_next_steps() {
        let mut input = basic_input();
        input.current_status = IncidentStatus::Resolved;

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("post-incident documentation"));
    }

    #[test]
    fn payload_deserializes_with_defaults() {
        let input: IncidentInput = serde_json::from_value(serde_json::json!({
            "incident_title": "T",
            "impact_summary": "I",
            "severity": "P3",
            "audience": "client",
        }))
        .unwrap();

        assert_eq!(input.severity, Severity::P3);
        assert_eq!(input.audience, Audience::Client);
        assert_eq!(input.current_status, IncidentStatus::Investigating);
    }
}

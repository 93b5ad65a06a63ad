//! Safe troubleshooting runbook generator
//!
//! Generates SAFE, reusable troubleshooting steps for recurring network
//! issues from two selections (domain, symptom). Every built-in step is
//! non-disruptive (gui_only); each runbook carries an evidence checklist
//! and STOP conditions for escalation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::render::{checkbox_list, timestamp};
use super::SkillError;

/// Access level the operator has on the affected systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    GuiOnly,
    CliReadOnly,
    CliFull,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::GuiOnly => "gui_only",
            AccessMode::CliReadOnly => "cli_read_only",
            AccessMode::CliFull => "cli_full",
        }
    }
}

struct Symptom {
    category: &'static str,
    explanation: &'static str,
    diagnostic_steps: &'static [&'static str],
    evidence_checklist: &'static [&'static str],
    stop_conditions: &'static [&'static str],
}

struct Playbook {
    domain: &'static str,
    escalation_path: &'static str,
    symptoms: &'static [Symptom],
}

static PLAYBOOKS: &[Playbook] = &[
    Playbook {
        domain: "firewall",
        escalation_path: "Contact Firewall Team Lead or Security Operations",
        symptoms: &[
            Symptom {
                category: "high_cpu",
                explanation: "Firewall CPU utilization exceeds normal thresholds, potentially impacting traffic inspection.",
                diagnostic_steps: &[
                    "Check CPU utilization in dashboard",
                    "Review active connections count",
                    "Check for unusual traffic patterns in logs",
                    "Verify NAT session counts",
                    "Review recent policy changes",
                ],
                evidence_checklist: &[
                    "Screenshot of CPU utilization graph (last 24h)",
                    "Active connection count",
                    "Top talkers report",
                    "Recent policy change log",
                ],
                stop_conditions: &[
                    "CPU exceeds 95% for more than 5 minutes",
                    "Packet drops reported",
                    "Management interface unresponsive",
                ],
            },
            Symptom {
                category: "connectivity_loss",
                explanation: "Traffic is not passing through the firewall as expected.",
                diagnostic_steps: &[
                    "Verify interface status in dashboard",
                    "Check policy rules for the affected traffic",
                    "Review deny logs for blocked traffic",
                    "Verify NAT rules if applicable",
                    "Check routing table entries",
                ],
                evidence_checklist: &[
                    "Interface status screenshot",
                    "Relevant policy rules screenshot",
                    "Deny log entries for affected source/destination",
                    "NAT configuration if applicable",
                ],
                stop_conditions: &[
                    "Multiple zones affected",
                    "Unable to identify blocking rule",
                    "Suspected security incident",
                ],
            },
        ],
    },
    Playbook {
        domain: "f5",
        escalation_path: "Contact F5 Team Lead or Application Delivery",
        symptoms: &[
            Symptom {
                category: "pool_down",
                explanation: "One or more pool members are marked down, affecting load balancing.",
                diagnostic_steps: &[
                    "Check pool member status in GUI",
                    "Review health monitor results",
                    "Verify backend server connectivity",
                    "Check for SSL certificate issues",
                    "Review pool statistics for error patterns",
                ],
                evidence_checklist: &[
                    "Pool status screenshot",
                    "Health monitor configuration",
                    "Recent pool statistics",
                    "Backend server health check results",
                ],
                stop_conditions: &[
                    "All pool members down",
                    "SSL handshake failures increasing",
                    "Application team reports service outage",
                ],
            },
            Symptom {
                category: "ssl_error",
                explanation: "SSL/TLS termination issues affecting client connections.",
                diagnostic_steps: &[
                    "Check SSL profile configuration",
                    "Verify certificate validity and chain",
                    "Review cipher suite settings",
                    "Check client-side SSL logs",
                    "Verify SNI configuration if applicable",
                ],
                evidence_checklist: &[
                    "Certificate details screenshot",
                    "SSL profile configuration",
                    "Error log entries",
                    "Cipher suite list",
                ],
                stop_conditions: &[
                    "Certificate expired",
                    "Certificate chain incomplete",
                    "Multiple applications affected",
                ],
            },
        ],
    },
    Playbook {
        domain: "circuit",
        escalation_path: "Contact Network Operations or Carrier Support",
        symptoms: &[
            Symptom {
                category: "latency",
                explanation: "Network latency exceeds acceptable thresholds for the circuit.",
                diagnostic_steps: &[
                    "Check interface error counters",
                    "Review bandwidth utilization graphs",
                    "Verify QoS policy application",
                    "Check for packet drops at interface",
                    "Review carrier SLA metrics if available",
                ],
                evidence_checklist: &[
                    "Latency graph (last 24h)",
                    "Bandwidth utilization graph",
                    "Interface error counters",
                    "QoS policy screenshot",
                ],
                stop_conditions: &[
                    "Latency exceeds SLA threshold",
                    "Packet loss detected",
                    "Circuit errors increasing",
                ],
            },
            Symptom {
                category: "flapping",
                explanation: "Circuit or interface is repeatedly going up and down.",
                diagnostic_steps: &[
                    "Check interface status history",
                    "Review optical power levels if fiber",
                    "Check for physical layer errors",
                    "Verify both ends report same status",
                    "Review recent changes at physical layer",
                ],
                evidence_checklist: &[
                    "Interface state change log",
                    "Optical power readings",
                    "Physical layer error counters",
                    "Both-end status comparison",
                ],
                stop_conditions: &[
                    "Flapping continues after 15 minutes",
                    "Multiple circuits affected",
                    "Physical layer errors increasing",
                ],
            },
        ],
    },
];

/// Lists the domains a playbook exists for
pub fn available_domains() -> Vec<&'static str> {
    PLAYBOOKS.iter().map(|p| p.domain).collect()
}

/// Lists the symptom categories of a domain (empty for unknown domains)
pub fn symptoms_for_domain(domain: &str) -> Vec<&'static str> {
    PLAYBOOKS
        .iter()
        .find(|p| p.domain == domain)
        .map(|p| p.symptoms.iter().map(|s| s.category).collect())
        .unwrap_or_default()
}

/// Input for the runbook skill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunbookInput {
    pub domain: String,
    pub symptom_category: String,
    pub access_mode: AccessMode,
    pub environment: String,
}

impl RunbookInput {
    fn validate(&self) -> Result<(), SkillError> {
        if self.domain.trim().is_empty() {
            return Err(SkillError::MissingField("domain"));
        }
        if self.symptom_category.trim().is_empty() {
            return Err(SkillError::MissingField("symptom_category"));
        }
        Ok(())
    }

    fn environment(&self) -> &str {
        if self.environment.is_empty() {
            "prod"
        } else {
            &self.environment
        }
    }
}

/// Generates a troubleshooting runbook
pub fn generate(input: &RunbookInput, generated_at: DateTime<Utc>) -> Result<String, SkillError> {
    input.validate()?;

    let playbook = PLAYBOOKS
        .iter()
        .find(|p| p.domain == input.domain)
        .ok_or_else(|| SkillError::UnknownDomain {
            domain: input.domain.clone(),
            available: available_domains().join(", "),
        })?;

    let symptom = playbook
        .symptoms
        .iter()
        .find(|s| s.category == input.symptom_category)
        .ok_or_else(|| SkillError::UnknownSymptom {
            domain: input.domain.clone(),
            symptom: input.symptom_category.clone(),
            available: symptoms_for_domain(&input.domain).join(", "),
        })?;

    let mut lines = vec![
        format!(
            "# Troubleshooting Runbook: {} - {}",
            input.domain.to_uppercase(),
            title_case(&input.symptom_category)
        ),
        String::new(),
        format!(
            "**Environment:** {} | **Access Mode:** {}",
            input.environment().to_uppercase(),
            input.access_mode.as_str()
        ),
        format!("**Generated:** {}", timestamp(generated_at)),
        String::new(),
        "## Symptom Explanation".to_string(),
        symptom.explanation.to_string(),
        String::new(),
        "## Safe Diagnostic Steps".to_string(),
    ];

    for (i, step) in symptom.diagnostic_steps.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, step));
    }

    lines.push(String::new());
    lines.push("## Evidence Checklist".to_string());
    lines.push(checkbox_list(symptom.evidence_checklist));

    lines.push(String::new());
    lines.push("## STOP Conditions (Escalate Immediately)".to_string());
    for condition in symptom.stop_conditions {
        lines.push(format!("- {}", condition));
    }

    lines.push(String::new());
    lines.push(format!("**Escalation Path:** {}", playbook.escalation_path));

    Ok(lines.join("\n"))
}

/// `"high_cpu"` -> `"High Cpu"`
fn title_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

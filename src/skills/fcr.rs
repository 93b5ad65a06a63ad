//! FCR section autofill
//!
//! Generates GNOC-ready content for the sections of a firewall change
//! request. One required field (purpose); everything else defaults.
//! Generates CONTENT only - it does not replace the official FCR form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::render::{checkbox_list, timestamp};
use super::SkillError;

/// Type of network change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    #[default]
    FirewallRule,
    NatChange,
    F5Ssl,
    RoutingChange,
    AclUpdate,
    VpnConfig,
}

impl ChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::FirewallRule => "Firewall Rule",
            ChangeType::NatChange => "Nat Change",
            ChangeType::F5Ssl => "F5 Ssl",
            ChangeType::RoutingChange => "Routing Change",
            ChangeType::AclUpdate => "Acl Update",
            ChangeType::VpnConfig => "Vpn Config",
        }
    }

    fn tests(&self) -> &'static [&'static str] {
        match self {
            ChangeType::FirewallRule => &[
                "Verify rule syntax in staging/lab environment",
                "Confirm source/destination objects exist",
                "Test connectivity with rule in place (lab)",
                "Verify logging is enabled for new rule",
            ],
            ChangeType::NatChange => &[
                "Verify NAT translation in lab environment",
                "Confirm IP addresses are not in use elsewhere",
                "Test end-to-end connectivity through NAT",
            ],
            ChangeType::F5Ssl => &[
                "Validate certificate chain completeness",
                "Verify certificate expiry date",
                "Test SSL handshake in staging",
                "Confirm cipher suite compatibility",
            ],
            ChangeType::RoutingChange => &[
                "Verify route does not conflict with existing routes",
                "Test reachability in lab environment",
                "Confirm BGP/OSPF adjacencies stable after change",
            ],
            ChangeType::AclUpdate => &[
                "Verify ACL syntax",
                "Test ACL in lab environment",
                "Confirm no unintended traffic blocked",
            ],
            ChangeType::VpnConfig => &[
                "Verify tunnel parameters match peer",
                "Test tunnel establishment in lab",
                "Confirm encryption settings are compliant",
            ],
        }
    }

    fn rollback_steps(&self) -> &'static [&'static str] {
        match self {
            ChangeType::FirewallRule => &[
                "Remove newly added rule(s)",
                "Restore previous rule configuration if modified",
                "Verify traffic flow returns to pre-change state",
            ],
            ChangeType::NatChange => &[
                "Remove NAT translation entry",
                "Restore original NAT configuration",
                "Verify connectivity restored",
            ],
            ChangeType::F5Ssl => &[
                "Revert to previous SSL profile",
                "Restore previous certificate",
                "Verify SSL termination functional",
            ],
            ChangeType::RoutingChange => &[
                "Remove added route(s)",
                "Restore previous routing configuration",
                "Verify routing table stable",
            ],
            ChangeType::AclUpdate => &[
                "Revert ACL to previous version",
                "Verify traffic flow restored",
            ],
            ChangeType::VpnConfig => &[
                "Disable new VPN configuration",
                "Restore previous VPN settings",
                "Verify tunnel stability",
            ],
        }
    }

    fn technical_description(&self, purpose: &str, direction: Direction, rule_count: RuleCount) -> String {
        match self {
            ChangeType::FirewallRule => format!(
                "Add firewall rule to {} traffic for {}. Rule count: {}.",
                direction, purpose, rule_count
            ),
            ChangeType::NatChange => {
                format!("Configure NAT translation for {}. Direction: {}.", purpose, direction)
            }
            ChangeType::F5Ssl => format!("Update F5 SSL profile/certificate for {}.", purpose),
            ChangeType::RoutingChange => {
                format!("Modify routing configuration for {}. Direction: {}.", purpose, direction)
            }
            ChangeType::AclUpdate => {
                format!("Update access control list for {}. Direction: {}.", purpose, direction)
            }
            ChangeType::VpnConfig => format!("Configure VPN settings for {}.", purpose),
        }
    }
}

/// Number of rules touched by the change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCount {
    #[default]
    Single,
    Multiple,
}

impl fmt::Display for RuleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCount::Single => f.write_str("single"),
            RuleCount::Multiple => f.write_str("multiple"),
        }
    }
}

/// Traffic direction affected by the change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Inbound,
    Outbound,
    Both,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => f.write_str("inbound"),
            Direction::Outbound => f.write_str("outbound"),
            Direction::Both => f.write_str("both"),
        }
    }
}

/// Assessed risk of the change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    fn impact_statement(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Minimal impact expected. Change affects limited scope with no service disruption."
            }
            RiskLevel::Medium => {
                "Moderate impact possible. Brief connectivity interruption may occur during implementation."
            }
            RiskLevel::High => {
                "Significant impact possible. Service disruption expected during maintenance window."
            }
        }
    }

    fn rollback_time(&self) -> &'static str {
        match self {
            RiskLevel::Low => "< 5 minutes",
            RiskLevel::Medium => "5-15 minutes",
            RiskLevel::High => "15-30 minutes",
        }
    }
}

const CHECKLIST_ITEMS: &[&str] = &[
    "Change reviewed and approved by team lead",
    "Rollback procedure documented and tested",
    "Maintenance window scheduled (if required)",
    "Stakeholders notified",
    "Monitoring alerts configured",
];

const EVIDENCE_CHECKLIST: &[&str] = &[
    "Pre-change configuration backup",
    "Screenshot of change implementation",
    "Post-change verification results",
    "Test results documentation",
];

/// Input for the FCR autofill skill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FcrInput {
    pub purpose: String,
    pub change_type: ChangeType,
    pub rule_count: RuleCount,
    pub direction: Direction,
    pub risk_level: RiskLevel,
    pub environment: String,
}

impl FcrInput {
    fn validate(&self) -> Result<(), SkillError> {
        if self.purpose.trim().is_empty() {
            return Err(SkillError::MissingField("purpose"));
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

/// Generates FCR section content
pub fn generate(input: &FcrInput, generated_at: DateTime<Utc>) -> Result<String, SkillError> {
    input.validate()?;

    let environment = input.environment().to_uppercase();

    let mut lines = vec![
        "# FCR Section Content".to_string(),
        String::new(),
        format!("**Generated:** {}", timestamp(generated_at)),
        format!("**Change Type:** {}", input.change_type.label()),
        format!("**Environment:** {}", environment),
        format!("**Risk Level:** {}", input.risk_level.as_str().to_uppercase()),
        String::new(),
        "---".to_string(),
        String::new(),
        "## 1. Purpose / Business Justification".to_string(),
        input.purpose.clone(),
        String::new(),
        "## 2. Technical Description".to_string(),
        input
            .change_type
            .technical_description(&input.purpose, input.direction, input.rule_count),
        String::new(),
        "## 3. Tests Conducted".to_string(),
        checkbox_list(input.change_type.tests()),
        String::new(),
        "## 4. Impact Assessment".to_string(),
        input.risk_level.impact_statement().to_string(),
        String::new(),
        "**Affected Systems:**".to_string(),
        format!("- {} {} infrastructure", environment, input.change_type.label()),
        String::new(),
        "## 5. Rollback Procedure".to_string(),
        format!(
            "**Estimated Rollback Time:** {}",
            input.risk_level.rollback_time()
        ),
        String::new(),
    ];

    for (i, step) in input.change_type.rollback_steps().iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, step));
    }

    lines.push(String::new());
    lines.push("## 6. Pre-Implementation Checklist".to_string());
    lines.push(checkbox_list(CHECKLIST_ITEMS));

    lines.push(String::new());
    lines.push("## 7. Evidence Checklist".to_string());
    lines.push(checkbox_list(EVIDENCE_CHECKLIST));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn basic_input() -> FcrInput {
        FcrInput {
            purpose: "Allow monitoring server to poll branch routers".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_fcr_renders_all_sections() {
        let output = generate(&basic_input(), at()).unwrap();

        for section in [
            "## 1. Purpose",
            "## 2. Technical Description",
            "## 3. Tests Conducted",
            "## 4. Impact Assessment",
            "## 5. Rollback Procedure",
            "## 6. Pre-Implementation Checklist",
            "## 7. Evidence Checklist",
        ] {
            assert!(output.contains(section), "missing {section}");
        }

        assert!(output.contains("monitoring server"));
        assert!(output.contains("**Change Type:** Firewall Rule"));
        assert!(output.contains("**Risk Level:** LOW"));
        assert!(output.contains("< 5 minutes"));
    }

    #[test]
    fn missing_purpose_is_rejected() {
        let input = FcrInput::default();
        let err = generate(&input, at()).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("purpose")));
    }

    #[test]
    fn technical_description_tracks_change_type() {
        let mut input = basic_input();
        input.change_type = ChangeType::NatChange;
        input.direction = Direction::Outbound;

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("Configure NAT translation"));
        assert!(output.contains("Direction: outbound"));
    }

    #[test]
    fn high_risk_changes_impact_and_rollback_time() {
        let mut input = basic_input();
        input.risk_level = RiskLevel::High;

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("Service disruption expected"));
        assert!(output.contains("15-30 minutes"));
    }

    #[test]
    fn environment_appears_in_affected_systems() {
        let mut input = basic_input();
        input.environment = "uat".to_string();

        let output = generate(&input, at()).unwrap();
        assert!(output.contains("- UAT Firewall Rule infrastructure"));
    }

    #[test]
    fn payload_deserializes_with_defaults() {
        let input: FcrInput = serde_json::from_value(serde_json::json!({
            "purpose": "P",
            "change_type": "f5_ssl",
            "risk_level": "medium",
        }))
        .unwrap();

        assert_eq!(input.change_type, ChangeType::F5Ssl);
        assert_eq!(input.risk_level, RiskLevel::Medium);
        assert_eq!(input.direction, Direction::Inbound);
    }
}

//! Normalization of external static-analysis diagnostics.
//!
//! The diagnostics tool is consumed as an opaque list of
//! `{check, description, impact}` records; each record becomes a Finding
//! carrying the tool's own check name as its category.

use crate::core::{Finding, FindingCategory, Severity};
use serde::{Deserialize, Serialize};

fn default_check() -> String {
    "Unknown".to_string()
}

fn default_description() -> String {
    "No description".to_string()
}

/// One record emitted by the external diagnostics tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalDiagnostic {
    #[serde(default = "default_check")]
    pub check: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub impact: String,
}

#[derive(Debug, Deserialize)]
struct DetectorOutput {
    #[serde(default)]
    results: DetectorResults,
}

#[derive(Debug, Default, Deserialize)]
struct DetectorResults {
    #[serde(default)]
    detectors: Vec<ExternalDiagnostic>,
}

/// Parses the tool's JSON output: either the full `{"results": {"detectors":
/// [...]}}` shape or a bare list of diagnostics.
pub fn parse_diagnostics(raw: &str) -> Result<Vec<ExternalDiagnostic>, serde_json::Error> {
    if let Ok(output) = serde_json::from_str::<DetectorOutput>(raw) {
        return Ok(output.results.detectors);
    }
    serde_json::from_str::<Vec<ExternalDiagnostic>>(raw)
}

/// Normalizes diagnostics to the Finding shape. An impact mentioning
/// "critical" (case-insensitive) maps to HIGH, everything else to MEDIUM.
pub fn normalize_diagnostics(diagnostics: Vec<ExternalDiagnostic>, source: &str) -> Vec<Finding> {
    diagnostics
        .into_iter()
        .map(|diagnostic| {
            let severity = if diagnostic.impact.to_lowercase().contains("critical") {
                Severity::High
            } else {
                Severity::Medium
            };
            Finding::new(
                FindingCategory::External(diagnostic.check),
                severity,
                diagnostic.description,
                source,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detector_shape() {
        let raw = r#"{
            "results": {
                "detectors": [
                    { "check": "reentrancy-eth", "description": "Reentrancy in withdraw()", "impact": "High" },
                    { "check": "arbitrary-send", "description": "Critical: anyone can drain", "impact": "Critical severity issue" }
                ]
            }
        }"#;
        let diagnostics = parse_diagnostics(raw).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].check, "reentrancy-eth");
    }

    #[test]
    fn test_parse_bare_list_and_defaults() {
        let raw = r#"[ { "impact": "Medium" } ]"#;
        let diagnostics = parse_diagnostics(raw).unwrap();
        assert_eq!(diagnostics[0].check, "Unknown");
        assert_eq!(diagnostics[0].description, "No description");
    }

    #[test]
    fn test_normalization_severity_rule() {
        let diagnostics = vec![
            ExternalDiagnostic {
                check: "suicidal".to_string(),
                description: "selfdestruct reachable".to_string(),
                impact: "CRITICAL".to_string(),
            },
            ExternalDiagnostic {
                check: "timestamp".to_string(),
                description: "block.timestamp comparison".to_string(),
                impact: "Informational".to_string(),
            },
        ];

        let findings = normalize_diagnostics(diagnostics, "slither");
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[1].severity, Severity::Medium);
        assert_eq!(findings[0].source, "slither");
        assert_eq!(
            findings[0].category,
            FindingCategory::External("suicidal".to_string())
        );
    }
}

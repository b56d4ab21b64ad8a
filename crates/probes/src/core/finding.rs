use crate::core::{ProbeCategory, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a finding: one of the built-in probe categories, or the
/// check name reported by an external diagnostics tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingCategory {
    Probe(ProbeCategory),
    External(String),
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Probe(category) => write!(f, "{category}"),
            FindingCategory::External(check) => write!(f, "{check}"),
        }
    }
}

impl From<ProbeCategory> for FindingCategory {
    fn from(category: ProbeCategory) -> Self {
        FindingCategory::Probe(category)
    }
}

/// One detected (or externally reported) vulnerability instance.
///
/// Immutable once created: the severity assigned at detection time is final
/// and the aggregator never re-labels it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub category: FindingCategory,

    pub description: String,

    pub severity: Severity,

    /// The probe that produced this finding, or the name of the external tool.
    pub source: String,

    #[serde(rename = "timestamp")]
    pub detected_at: DateTime<Utc>,
}

impl Finding {
    pub fn new(
        category: impl Into<FindingCategory>,
        severity: Severity,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            severity,
            source: source.into(),
            detected_at: Utc::now(),
        }
    }

    pub fn with_detected_at(mut self, detected_at: DateTime<Utc>) -> Self {
        self.detected_at = detected_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_forms() {
        let probe: FindingCategory = ProbeCategory::Reentrancy.into();
        assert_eq!(serde_json::to_string(&probe).unwrap(), "\"reentrancy\"");

        let external = FindingCategory::External("uninitialized-state".to_string());
        assert_eq!(
            serde_json::to_string(&external).unwrap(),
            "\"uninitialized-state\""
        );

        let parsed: FindingCategory = serde_json::from_str("\"flash_loan\"").unwrap();
        assert_eq!(parsed, FindingCategory::Probe(ProbeCategory::FlashLoan));

        let parsed: FindingCategory = serde_json::from_str("\"arbitrary-send\"").unwrap();
        assert_eq!(parsed, FindingCategory::External("arbitrary-send".to_string()));
    }

    #[test]
    fn test_finding_json_field_names() {
        let finding = Finding::new(
            ProbeCategory::AccessControl,
            Severity::High,
            "Access control bypass in setOwner",
            "access_control",
        );
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["type"], "access_control");
        assert_eq!(value["severity"], "HIGH");
        assert!(value.get("timestamp").is_some());
        assert!(value.get("detected_at").is_none());
    }
}

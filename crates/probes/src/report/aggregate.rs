//! Report aggregation.
//!
//! Reduces per-category reports plus externally supplied findings into one
//! unified report. Aggregation is strictly additive: findings are never
//! dropped, rewritten, or re-labeled, and the flattened list preserves
//! category order followed by external order.

use crate::core::{Finding, ProbeCategory, Severity, SeverityCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one probe category for one run: either the findings it
/// produced, or the error that kept it from completing. Never mutated after
/// the probe returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryReport {
    Completed {
        findings: Vec<Finding>,
        severity_counts: SeverityCounts,
    },
    Failed {
        error: String,
    },
}

impl CategoryReport {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let severity_counts = SeverityCounts::from_findings(&findings);
        Self::Completed {
            findings,
            severity_counts,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::Completed { findings, .. } => findings,
            Self::Failed { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_vulnerabilities: usize,
    pub severity_counts: SeverityCounts,
    pub risk_level: Severity,
}

/// The aggregated result of one orchestration run. Built once, then rendered
/// and persisted; never reused across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedReport {
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "network")]
    pub target_identity: String,

    #[serde(rename = "test_results")]
    pub category_reports: BTreeMap<ProbeCategory, CategoryReport>,

    pub external_findings: Vec<Finding>,

    #[serde(rename = "vulnerabilities")]
    pub all_findings: Vec<Finding>,

    pub summary: ReportSummary,
}

impl UnifiedReport {
    /// Flattens the category reports and any external findings into one
    /// report. Failed categories contribute no findings but stay visible in
    /// `test_results`; completed categories whose recorded counts disagree
    /// with their findings are recounted with a warning.
    pub fn build(
        target_identity: impl Into<String>,
        category_reports: BTreeMap<ProbeCategory, CategoryReport>,
        external_findings: Vec<Finding>,
    ) -> Self {
        let mut report = Self {
            timestamp: Utc::now(),
            target_identity: target_identity.into(),
            category_reports,
            external_findings: Vec::new(),
            all_findings: Vec::new(),
            summary: ReportSummary {
                total_vulnerabilities: 0,
                severity_counts: SeverityCounts::default(),
                risk_level: Severity::Low,
            },
        };
        report.flatten();
        report.merge_external(external_findings);
        report
    }

    fn flatten(&mut self) {
        let mut all = Vec::new();
        for (category, category_report) in &self.category_reports {
            match category_report {
                CategoryReport::Completed {
                    findings,
                    severity_counts,
                } => {
                    let recounted = SeverityCounts::from_findings(findings);
                    if recounted != *severity_counts {
                        tracing::warn!(
                            category = %category,
                            "severity counts disagree with findings, recounting"
                        );
                    }
                    all.extend(findings.iter().cloned());
                }
                CategoryReport::Failed { error } => {
                    tracing::warn!(category = %category, %error, "category failed, no findings to merge");
                }
            }
        }
        self.all_findings = all;
        self.recompute_summary();
    }

    /// Appends externally sourced findings without deduplication. Existing
    /// findings are untouched.
    pub fn merge_external(&mut self, findings: Vec<Finding>) {
        if findings.is_empty() {
            return;
        }
        self.external_findings.extend(findings.iter().cloned());
        self.all_findings.extend(findings);
        self.recompute_summary();
    }

    fn recompute_summary(&mut self) {
        let severity_counts = SeverityCounts::from_findings(&self.all_findings);
        self.summary = ReportSummary {
            total_vulnerabilities: self.all_findings.len(),
            severity_counts,
            risk_level: severity_counts.risk_level(),
        };
    }

    pub fn risk_level(&self) -> Severity {
        self.summary.risk_level
    }

    /// Findings of one severity, in report order.
    pub fn findings_with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.all_findings
            .iter()
            .filter(move |finding| finding.severity == severity)
    }
}

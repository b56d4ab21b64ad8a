//! Report rendering and persistence.
//!
//! Two independent views over the same unified report: a lossless JSON
//! serialization and a human-readable markdown narrative. Rendering is a pure
//! function of the report — identical input produces byte-identical output.

use crate::core::{PersistenceError, Severity};
use crate::report::UnifiedReport;
use std::path::Path;

pub fn to_json(report: &UnifiedReport) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn to_markdown(report: &UnifiedReport) -> String {
    let mut md = String::from("# 🔒 Smart Contract Security Report\n\n");

    md.push_str(&format!(
        "Generated on: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("Network: {}\n\n", report.target_identity));

    md.push_str("## 📊 Executive Summary\n\n");
    md.push_str(&format!(
        "- **Total Vulnerabilities**: {}\n",
        report.summary.total_vulnerabilities
    ));
    md.push_str(&format!("- **Risk Level**: {}\n", report.summary.risk_level));
    md.push_str(&format!(
        "- **High Severity**: {}\n",
        report.summary.severity_counts.high
    ));
    md.push_str(&format!(
        "- **Medium Severity**: {}\n",
        report.summary.severity_counts.medium
    ));
    md.push_str(&format!(
        "- **Low Severity**: {}\n\n",
        report.summary.severity_counts.low
    ));

    md.push_str("## 🚨 Findings\n\n");
    if report.all_findings.is_empty() {
        md.push_str("No vulnerabilities detected.\n\n");
    } else {
        append_severity_group(&mut md, report, Severity::High, "High Severity Vulnerabilities");
        append_severity_group(
            &mut md,
            report,
            Severity::Medium,
            "Medium Severity Vulnerabilities",
        );
        append_severity_group(&mut md, report, Severity::Low, "Low Severity Vulnerabilities");
    }

    md.push_str(RECOMMENDATIONS);

    md.push_str("## 📋 Test Coverage\n\n");
    for (category, category_report) in &report.category_reports {
        md.push_str(&format!("### {category}\n"));
        match category_report.error() {
            Some(error) => md.push_str(&format!("- Error: {error}\n\n")),
            None => md.push_str(&format!(
                "- Findings: {}\n\n",
                category_report.findings().len()
            )),
        }
    }

    md
}

fn append_severity_group(md: &mut String, report: &UnifiedReport, severity: Severity, title: &str) {
    let findings: Vec<_> = report.findings_with_severity(severity).collect();
    if findings.is_empty() {
        return;
    }

    md.push_str(&format!("### {title}\n\n"));
    for finding in findings {
        md.push_str(&format!(
            "- **{}**: {} (source: {})\n",
            finding.category, finding.description, finding.source
        ));
    }
    md.push('\n');
}

const RECOMMENDATIONS: &str = r#"## 🛡️ Security Recommendations

1. **Immediate Actions Required**:
   - Fix all HIGH severity vulnerabilities before deployment
   - Implement proper access controls
   - Add reentrancy protection to all external calls

2. **Short-term Improvements**:
   - Address MEDIUM severity vulnerabilities
   - Implement proper input validation
   - Add event logging for security monitoring

3. **Long-term Security**:
   - Conduct regular security audits
   - Set up continuous monitoring
   - Establish a bug bounty program

"#;

/// Writes the structured artifact. Failure is fatal for this artifact only.
pub fn write_json(report: &UnifiedReport, path: &Path) -> Result<(), PersistenceError> {
    let rendered = to_json(report)?;
    std::fs::write(path, rendered).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the narrative artifact. Failure is fatal for this artifact only.
pub fn write_markdown(report: &UnifiedReport, path: &Path) -> Result<(), PersistenceError> {
    let rendered = to_markdown(report);
    std::fs::write(path, rendered).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

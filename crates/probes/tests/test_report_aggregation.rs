use anyhow::Result;
use std::collections::BTreeMap;
use tsuki_probes::{
    harness::{ScriptedContext, ScriptedTarget},
    CategoryReport, Finding, ProbeCategory, ProbeConfig, ProbeEngine, Severity, SeverityCounts,
    UnifiedReport,
};

fn finding(category: ProbeCategory, severity: Severity, description: &str) -> Finding {
    Finding::new(category, severity, description, category.as_str())
}

#[test]
fn test_empty_configuration_produces_an_empty_low_risk_report() -> Result<()> {
    let target = ScriptedTarget::new("EmptyTarget");
    let descriptor = target.descriptor();
    let mut ctx = ScriptedContext::new().with_target(target);

    let engine = ProbeEngine::with_defaults();
    let reports = engine.run_all(&mut ctx, &descriptor, &ProbeConfig::default());
    assert!(reports.is_empty());

    let report = UnifiedReport::build("EmptyTarget", reports, Vec::new());
    assert_eq!(report.summary.total_vulnerabilities, 0);
    assert_eq!(report.summary.risk_level, Severity::Low);
    assert!(report.all_findings.is_empty());
    Ok(())
}

#[test]
fn test_two_categories_with_mixed_severities_aggregate_to_high_risk() {
    let mut reports = BTreeMap::new();
    reports.insert(
        ProbeCategory::Reentrancy,
        CategoryReport::from_findings(vec![
            finding(ProbeCategory::Reentrancy, Severity::High, "drained"),
            finding(ProbeCategory::Reentrancy, Severity::Medium, "suspicious"),
        ]),
    );
    reports.insert(
        ProbeCategory::AccessControl,
        CategoryReport::from_findings(vec![
            finding(ProbeCategory::AccessControl, Severity::High, "bypass"),
            finding(ProbeCategory::AccessControl, Severity::Medium, "weak guard"),
        ]),
    );

    let report = UnifiedReport::build("Vault", reports, Vec::new());
    assert_eq!(
        report.summary.severity_counts,
        SeverityCounts {
            high: 2,
            medium: 2,
            low: 0
        }
    );
    assert_eq!(report.summary.risk_level, Severity::High);
    assert_eq!(report.summary.total_vulnerabilities, 4);
}

#[test]
fn test_category_report_counts_always_sum_to_findings() {
    let combos = vec![
        vec![],
        vec![finding(ProbeCategory::Slippage, Severity::Medium, "a")],
        vec![
            finding(ProbeCategory::GasLimit, Severity::High, "b"),
            finding(ProbeCategory::GasLimit, Severity::Medium, "c"),
            finding(ProbeCategory::GasLimit, Severity::Low, "d"),
        ],
    ];

    for findings in combos {
        let expected = findings.len();
        let report = CategoryReport::from_findings(findings);
        match &report {
            CategoryReport::Completed {
                severity_counts, ..
            } => assert_eq!(severity_counts.total(), expected),
            CategoryReport::Failed { .. } => unreachable!(),
        }
    }
}

#[test]
fn test_flattening_preserves_order_and_loses_nothing() {
    let mut reports = BTreeMap::new();
    reports.insert(
        ProbeCategory::Reentrancy,
        CategoryReport::from_findings(vec![finding(
            ProbeCategory::Reentrancy,
            Severity::High,
            "first",
        )]),
    );
    reports.insert(
        ProbeCategory::FlashLoan,
        CategoryReport::from_findings(vec![finding(
            ProbeCategory::FlashLoan,
            Severity::High,
            "second",
        )]),
    );
    reports.insert(
        ProbeCategory::GasLimit,
        CategoryReport::failed("iteration parameter rejected"),
    );

    let external = vec![Finding::new(
        tsuki_probes::FindingCategory::External("arbitrary-send".to_string()),
        Severity::Medium,
        "third",
        "slither",
    )];

    let report = UnifiedReport::build("Vault", reports, external);

    let descriptions: Vec<_> = report
        .all_findings
        .iter()
        .map(|f| f.description.as_str())
        .collect();
    // Category order (reentrancy before flash_loan), then external findings.
    assert_eq!(descriptions, vec!["first", "second", "third"]);

    // The failed category is still visible in test_results.
    assert!(report.category_reports[&ProbeCategory::GasLimit].is_failed());
    assert_eq!(report.summary.total_vulnerabilities, 3);
    assert_eq!(
        report.summary.total_vulnerabilities,
        report.all_findings.len()
    );
    assert_eq!(
        report.summary.total_vulnerabilities,
        report.summary.severity_counts.total()
    );
}

#[test]
fn test_external_merge_is_strictly_additive() {
    let mut reports = BTreeMap::new();
    reports.insert(
        ProbeCategory::Slippage,
        CategoryReport::from_findings(vec![finding(
            ProbeCategory::Slippage,
            Severity::Medium,
            "unbounded swap",
        )]),
    );

    let mut report = UnifiedReport::build("Pool", reports, Vec::new());
    let before = report.all_findings.clone();

    let external = vec![
        Finding::new(
            tsuki_probes::FindingCategory::External("suicidal".to_string()),
            Severity::High,
            "selfdestruct reachable",
            "slither",
        ),
        Finding::new(
            tsuki_probes::FindingCategory::External("timestamp".to_string()),
            Severity::Medium,
            "timestamp dependence",
            "slither",
        ),
    ];
    report.merge_external(external.clone());

    assert_eq!(report.all_findings.len(), before.len() + external.len());
    // Existing findings are untouched, in place and unchanged.
    assert_eq!(&report.all_findings[..before.len()], &before[..]);
    assert_eq!(report.external_findings.len(), 2);
    assert_eq!(report.summary.risk_level, Severity::High);
}

#[test]
fn test_risk_level_truth_table() {
    let cases = vec![
        (vec![], Severity::Low),
        (vec![Severity::Low], Severity::Low),
        (vec![Severity::Medium, Severity::Low], Severity::Medium),
        (
            vec![Severity::Low, Severity::Medium, Severity::High],
            Severity::High,
        ),
    ];

    for (severities, expected) in cases {
        let findings: Vec<_> = severities
            .into_iter()
            .map(|severity| finding(ProbeCategory::FrontRunning, severity, "x"))
            .collect();
        let mut reports = BTreeMap::new();
        reports.insert(
            ProbeCategory::FrontRunning,
            CategoryReport::from_findings(findings),
        );
        let report = UnifiedReport::build("T", reports, Vec::new());
        assert_eq!(report.summary.risk_level, expected);
    }
}

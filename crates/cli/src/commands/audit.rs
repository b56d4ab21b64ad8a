use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tsuki_probes::{
    report::{collect_external_findings, write_json, write_markdown},
    runner::TracingObserver,
    IsolationPolicy, ProbeEngine, Scenario, Severity, UnifiedReport,
};

#[derive(Args)]
pub struct AuditArgs {
    /// Scenario file describing identities, the target, and the probe
    /// configuration.
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Directory the report artifacts are written into.
    #[arg(short, long, default_value = "reports")]
    pub reports_dir: PathBuf,

    /// Contract sources handed to the external diagnostics tool. Without
    /// this, the diagnostics step is skipped.
    #[arg(long)]
    pub contracts: Option<PathBuf>,

    #[arg(long, default_value = "slither")]
    pub diagnostics_tool: String,

    /// Seconds to wait for the diagnostics tool before giving up on it.
    #[arg(long, default_value_t = 120)]
    pub diagnostics_timeout: u64,

    /// Skip the external diagnostics tool entirely.
    #[arg(long)]
    pub skip_diagnostics: bool,

    /// Let probes share accumulated target state instead of restoring a
    /// snapshot between probes.
    #[arg(long)]
    pub shared_state: bool,
}

pub fn execute(args: AuditArgs) -> Result<Severity> {
    println!(
        "{}",
        "🚀 Running comprehensive security probes...".bright_blue().bold()
    );

    let scenario = Scenario::load(&args.scenario)?;
    let descriptor = scenario.descriptor();
    let mut ctx = scenario.context();

    let isolation = if args.shared_state {
        IsolationPolicy::SharedState
    } else {
        IsolationPolicy::SnapshotPerProbe
    };

    let engine = ProbeEngine::with_defaults()
        .with_observer(Box::new(TracingObserver))
        .with_isolation(isolation);
    let category_reports = engine.run_all(&mut ctx, &descriptor, &scenario.probes);

    let external_findings = if args.skip_diagnostics {
        Vec::new()
    } else if let Some(contracts) = &args.contracts {
        println!("{}", "🔍 Running external diagnostics...".bright_blue());
        collect_external_findings(
            &args.diagnostics_tool,
            contracts,
            Duration::from_secs(args.diagnostics_timeout),
        )
    } else {
        tracing::debug!("no contracts directory supplied, skipping external diagnostics");
        Vec::new()
    };

    let report = UnifiedReport::build(descriptor.id.clone(), category_reports, external_findings);

    std::fs::create_dir_all(&args.reports_dir).with_context(|| {
        format!("failed to create reports directory {}", args.reports_dir.display())
    })?;

    let json_path = args.reports_dir.join("comprehensive_security_report.json");
    let markdown_path = args.reports_dir.join("security_report.md");

    // Each artifact fails independently; one bad write never rolls back the
    // other.
    let mut artifact_errors = Vec::new();
    match write_json(&report, &json_path) {
        Ok(()) => println!("📄 {}", json_path.display()),
        Err(err) => artifact_errors.push(err.to_string()),
    }
    match write_markdown(&report, &markdown_path) {
        Ok(()) => println!("📄 {}", markdown_path.display()),
        Err(err) => artifact_errors.push(err.to_string()),
    }

    print_summary(&report);

    if !artifact_errors.is_empty() {
        anyhow::bail!(
            "failed to persist report artifacts: {}",
            artifact_errors.join("; ")
        );
    }

    Ok(report.risk_level())
}

fn print_summary(report: &UnifiedReport) {
    println!("\n{}", "=".repeat(50).bright_blue());
    println!("{}", "🎯 SECURITY PROBE SUMMARY".bright_blue().bold());
    println!("{}", "=".repeat(50).bright_blue());
    println!(
        "Total Vulnerabilities: {}",
        report.summary.total_vulnerabilities
    );
    println!("Risk Level: {}", colorize_severity(report.summary.risk_level));
    println!("High Severity: {}", report.summary.severity_counts.high);
    println!("Medium Severity: {}", report.summary.severity_counts.medium);
    println!("Low Severity: {}", report.summary.severity_counts.low);
    println!("{}", "=".repeat(50).bright_blue());

    match report.summary.risk_level {
        Severity::High => {
            println!(
                "{}",
                "⚠️  CRITICAL: High severity vulnerabilities found!".bright_red().bold()
            );
            println!("🚨 Do NOT deploy to production without fixing these issues!");
        }
        Severity::Medium => {
            println!(
                "{}",
                "⚠️  WARNING: Medium severity vulnerabilities found!".yellow().bold()
            );
            println!("🔧 Address these issues before production deployment.");
        }
        Severity::Low => {
            println!(
                "{}",
                "✅ Good: No critical vulnerabilities found!".bright_green().bold()
            );
        }
    }
}

fn colorize_severity(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::High => severity.to_string().bright_red().bold(),
        Severity::Medium => severity.to_string().yellow().bold(),
        Severity::Low => severity.to_string().bright_green(),
    }
}

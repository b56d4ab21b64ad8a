use anyhow::Result;
use tsuki_probes::{
    core::ProbeError,
    harness::{Behavior, ParamKind, ScriptedContext, ScriptedEntryPoint, ScriptedTarget},
    IntegerOverflowProbe, Probe, ProbeConfig, Severity,
};

fn token() -> ScriptedTarget {
    ScriptedTarget::new("SimpleToken")
        .with_entry_point(
            ScriptedEntryPoint::new("calculateBonus", Behavior::CheckedArithmetic { gas: 24_000 })
                .with_param(ParamKind::Uint { bits: 64 }),
        )
        .with_entry_point(
            ScriptedEntryPoint::new("addReward", Behavior::UncheckedArithmetic { gas: 24_000 })
                .with_param(ParamKind::Uint { bits: 64 }),
        )
        .with_entry_point(ScriptedEntryPoint::new(
            "pause",
            Behavior::Accept { gas: 21_000 },
        ))
}

#[test]
fn test_reverting_out_of_range_input_yields_zero_findings() -> Result<()> {
    let target = token();
    let descriptor = target.descriptor();
    let mut ctx = ScriptedContext::new().with_target(target);

    let mut config = ProbeConfig::default();
    config.integer_overflow.entry_points = vec!["calculateBonus".to_string()];

    let findings = IntegerOverflowProbe::new().run(&mut ctx, &descriptor, &config)?;
    assert!(findings.is_empty());
    Ok(())
}

#[test]
fn test_silent_wrapping_yields_a_finding_per_out_of_range_input() -> Result<()> {
    let target = token();
    let descriptor = target.descriptor();
    let mut ctx = ScriptedContext::new().with_target(target);

    let mut config = ProbeConfig::default();
    config.integer_overflow.entry_points = vec!["addReward".to_string()];

    let findings = IntegerOverflowProbe::new().run(&mut ctx, &descriptor, &config)?;

    println!("[Integer Overflow] Detected {} findings", findings.len());
    for finding in &findings {
        println!("  - {}", finding.description);
    }

    // Two out-of-range stimuli in the matrix: max+1 and -1.
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.severity == Severity::High));
    Ok(())
}

#[test]
fn test_entry_point_without_numeric_parameter_is_a_probe_error() {
    let target = token();
    let descriptor = target.descriptor();
    let mut ctx = ScriptedContext::new().with_target(target);

    let mut config = ProbeConfig::default();
    config.integer_overflow.entry_points = vec!["pause".to_string()];

    let result = IntegerOverflowProbe::new().run(&mut ctx, &descriptor, &config);
    assert!(matches!(result, Err(ProbeError::NoNumericParameter(_))));
}

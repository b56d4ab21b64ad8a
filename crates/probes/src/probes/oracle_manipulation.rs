//! Oracle liveness probe.
//!
//! Reads each configured price entry point and compares the reported value
//! against the configured sentinel constant. A feed stuck on the sentinel is
//! a fixed test price rather than a live source.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct OracleManipulationProbe;

impl OracleManipulationProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.oracle_manipulation;
        let caller = ctx.owner()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            let outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point).from_caller(&caller),
            )?;

            if outcome.reverted {
                tracing::debug!(%entry_point, reason = ?outcome.revert_reason, "price read reverted");
                continue;
            }

            match outcome.return_value {
                Some(value) if value == section.sentinel_price => {
                    findings.push(Finding::new(
                        ProbeCategory::OracleManipulation,
                        Severity::Medium,
                        format!(
                            "Fixed oracle price in {entry_point}: reported value equals the \
                             {value} sentinel constant",
                        ),
                        self.name(),
                    ));
                }
                Some(_) => {}
                None => {
                    tracing::debug!(%entry_point, "entry point returned no value, skipping");
                }
            }
        }

        Ok(findings)
    }
}

impl Default for OracleManipulationProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    OracleManipulationProbe,
    category: ProbeCategory::OracleManipulation,
    name: "oracle-manipulation-probe",
    description: "Flags price sources reporting a known fixed sentinel value"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{Behavior, ScriptedContext, ScriptedEntryPoint, ScriptedTarget};

    const SENTINEL: u128 = 1_000_000_000_000_000_000_000;

    #[test]
    fn test_sentinel_price_is_reported() -> anyhow::Result<()> {
        let target = ScriptedTarget::new("pool").with_entry_point(ScriptedEntryPoint::new(
            "getTokenPrice",
            Behavior::ConstantValue {
                value: SENTINEL,
                gas: 23_000,
            },
        ));
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.oracle_manipulation.entry_points = vec!["getTokenPrice".to_string()];

        let findings = OracleManipulationProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        Ok(())
    }

    #[test]
    fn test_live_price_is_clean() -> anyhow::Result<()> {
        let target = ScriptedTarget::new("pool").with_entry_point(ScriptedEntryPoint::new(
            "getTokenPrice",
            Behavior::ConstantValue {
                value: SENTINEL + 17,
                gas: 23_000,
            },
        ));
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.oracle_manipulation.entry_points = vec!["getTokenPrice".to_string()];

        let findings = OracleManipulationProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert!(findings.is_empty());
        Ok(())
    }
}

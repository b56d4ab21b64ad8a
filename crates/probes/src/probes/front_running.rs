//! Front-running probe (advisory).
//!
//! Issues two competing invocations of the same entry point, the second with
//! a priority-fee bump. When both land without any ordering guard firing, the
//! contract shows no evidence of ordering-independent correctness; that is
//! reported as a LOW advisory finding, not a confirmed vulnerability.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct FrontRunningProbe;

impl FrontRunningProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.front_running;
        let unprivileged: Vec<String> = ctx
            .identities()
            .iter()
            .filter(|identity| !identity.privileged)
            .map(|identity| identity.name.clone())
            .collect();
        let victim = unprivileged
            .first()
            .cloned()
            .ok_or(crate::core::HarnessError::NoUnprivilegedIdentity)?;
        let rival = unprivileged.last().cloned().unwrap_or_else(|| victim.clone());

        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            let victim_outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point)
                    .from_caller(&victim)
                    .with_value(section.trade_value),
            )?;

            let rival_outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point)
                    .from_caller(&rival)
                    .with_value(section.trade_value.saturating_add(1))
                    .with_priority_fee(section.priority_fee_bump),
            )?;

            if victim_outcome.succeeded() && rival_outcome.succeeded() {
                findings.push(Finding::new(
                    ProbeCategory::FrontRunning,
                    Severity::Low,
                    format!(
                        "Front-running exposure in {entry_point}: a competing call with a higher \
                         priority fee succeeded alongside the victim call (advisory)",
                    ),
                    self.name(),
                ));
            } else {
                tracing::debug!(%entry_point, "ordering guard observed, no advisory");
            }
        }

        Ok(findings)
    }
}

impl Default for FrontRunningProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    FrontRunningProbe,
    category: ProbeCategory::FrontRunning,
    name: "front-running-probe",
    description: "Issues competing fee-ordered calls and reports missing ordering guards"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{Behavior, ScriptedContext, ScriptedEntryPoint, ScriptedTarget};

    #[test]
    fn test_competing_success_emits_advisory() -> anyhow::Result<()> {
        let target = ScriptedTarget::new("dex").with_entry_point(
            ScriptedEntryPoint::new("placeBid", Behavior::Accept { gas: 32_000 }).payable(),
        );
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.front_running.entry_points = vec!["placeBid".to_string()];

        let findings = FrontRunningProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        Ok(())
    }

    #[test]
    fn test_guarded_entry_point_emits_nothing() -> anyhow::Result<()> {
        let target = ScriptedTarget::new("dex").with_entry_point(ScriptedEntryPoint::new(
            "placeBid",
            Behavior::Revert {
                reason: "commit-reveal phase mismatch".to_string(),
            },
        ));
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.front_running.entry_points = vec!["placeBid".to_string()];

        let findings = FrontRunningProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert!(findings.is_empty());
        Ok(())
    }
}

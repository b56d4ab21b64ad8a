//! Reentrancy probe.
//!
//! Issues a value-bearing call from an unprivileged identity and compares the
//! target balance afterwards with the expected deposit. A balance below the
//! expectation means funds left through an unexpected extra transfer while
//! the call was in flight. The check is a heuristic over observable balance
//! movement; no adversarial re-entrant callback is simulated.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct ReentrancyProbe;

impl ReentrancyProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.reentrancy;
        let caller = ctx.unprivileged()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            let before = ctx.balance_of(&target.id)?;
            let outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point)
                    .from_caller(&caller)
                    .with_value(section.deposit_amount),
            )?;

            if outcome.reverted {
                tracing::debug!(%entry_point, reason = ?outcome.revert_reason, "call reverted, path is protected");
                continue;
            }

            let expected = before.saturating_add(section.deposit_amount);
            let actual = ctx.balance_of(&target.id)?;
            if actual < expected {
                findings.push(Finding::new(
                    ProbeCategory::Reentrancy,
                    Severity::High,
                    format!(
                        "Reentrancy vulnerability detected in {entry_point}: balance fell to \
                         {actual} after a {amount} deposit (expected {expected})",
                        amount = section.deposit_amount,
                    ),
                    self.name(),
                ));
            }
        }

        Ok(findings)
    }
}

impl Default for ReentrancyProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    ReentrancyProbe,
    category: ProbeCategory::Reentrancy,
    name: "reentrancy-probe",
    description: "Detects balance drained through unexpected extra transfers during a call"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{Behavior, ParamKind, ScriptedContext, ScriptedEntryPoint, ScriptedTarget};

    fn leaky_vault() -> ScriptedTarget {
        ScriptedTarget::new("vault")
            .with_balance(50_000)
            .with_entry_point(
                ScriptedEntryPoint::new("withdraw", Behavior::LeakyWithdraw { leak: 777, gas: 45_000 })
                    .with_param(ParamKind::Uint { bits: 64 })
                    .payable(),
            )
            .with_entry_point(
                ScriptedEntryPoint::new("withdrawSecure", Behavior::Accept { gas: 45_000 }).payable(),
            )
    }

    #[test]
    fn test_drained_balance_is_reported() -> anyhow::Result<()> {
        let target = leaky_vault();
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.reentrancy.entry_points = vec!["withdraw".to_string()];

        let findings = ReentrancyProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        Ok(())
    }

    #[test]
    fn test_clean_withdraw_and_missing_entry_point_produce_nothing() -> anyhow::Result<()> {
        let target = leaky_vault();
        let descriptor = target.descriptor();
        let mut ctx = ScriptedContext::new().with_target(target);

        let mut config = ProbeConfig::default();
        config.reentrancy.entry_points =
            vec!["withdrawSecure".to_string(), "notDeclared".to_string()];

        let findings = ReentrancyProbe::new().run(&mut ctx, &descriptor, &config)?;
        assert!(findings.is_empty());
        Ok(())
    }
}

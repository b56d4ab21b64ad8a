//! Slippage protection probe.
//!
//! Submits a disproportionately large swap. A swap that large clearing
//! without revert means no slippage bound is enforced. Success-implies-
//! suspect is deliberate: this is a heuristic scanner, and the revert path is
//! the evidence of protection.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{CallArg, ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct SlippageProbe;

impl SlippageProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.slippage;
        let caller = ctx.unprivileged()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            let outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point)
                    .from_caller(&caller)
                    .with_arg(CallArg::Uint(section.swap_amount)),
            )?;

            if outcome.succeeded() {
                findings.push(Finding::new(
                    ProbeCategory::Slippage,
                    Severity::Medium,
                    format!(
                        "No slippage protection in {entry_point}: swap of {amount} succeeded \
                         without revert",
                        amount = section.swap_amount,
                    ),
                    self.name(),
                ));
            } else {
                tracing::debug!(%entry_point, reason = ?outcome.revert_reason, "slippage protection held");
            }
        }

        Ok(findings)
    }
}

impl Default for SlippageProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    SlippageProbe,
    category: ProbeCategory::Slippage,
    name: "slippage-probe",
    description: "Submits oversized swaps to check for missing slippage bounds"
);

//! Gas exhaustion probe.
//!
//! Drives each configured entry point with escalating iteration counts. Gas
//! usage above the configured high-water mark is reported even when the call
//! succeeds; an out-of-gas failure is the hard denial-of-service case. Any
//! other revert stops the escalation for that entry point.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{CallArg, ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct GasLimitProbe;

impl GasLimitProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.gas_limit;
        let caller = ctx.owner()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            for &iterations in &section.iteration_steps {
                let outcome = ctx.invoke(
                    &Invocation::new(&target.id, entry_point)
                        .from_caller(&caller)
                        .with_arg(CallArg::Uint(iterations as u128)),
                )?;

                if outcome.out_of_gas() {
                    findings.push(Finding::new(
                        ProbeCategory::GasLimit,
                        Severity::High,
                        format!("Gas limit DoS in {entry_point} with {iterations} iterations"),
                        self.name(),
                    ));
                    break;
                }

                if outcome.reverted {
                    tracing::debug!(
                        %entry_point,
                        iterations,
                        reason = ?outcome.revert_reason,
                        "call reverted before exhausting gas"
                    );
                    break;
                }

                if outcome.gas_used > section.gas_high_water {
                    findings.push(Finding::new(
                        ProbeCategory::GasLimit,
                        Severity::Medium,
                        format!(
                            "High gas usage in {entry_point}: {gas} at {iterations} iterations",
                            gas = outcome.gas_used,
                        ),
                        self.name(),
                    ));
                }
            }
        }

        Ok(findings)
    }
}

impl Default for GasLimitProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    GasLimitProbe,
    category: ProbeCategory::GasLimit,
    name: "gas-limit-probe",
    description: "Escalates iteration counts to find unbounded loops and out-of-gas failures"
);

//! Flash-loan probe.
//!
//! Requests a disproportionately large uncollateralized loan. The same
//! success-implies-suspect heuristic as the slippage probe, rated HIGH
//! because an unbounded flash loan is a direct drain primitive.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{CallArg, ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct FlashLoanProbe;

impl FlashLoanProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.flash_loan;
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
                    .with_arg(CallArg::Uint(section.loan_amount)),
            )?;

            if outcome.succeeded() {
                findings.push(Finding::new(
                    ProbeCategory::FlashLoan,
                    Severity::High,
                    format!(
                        "Flash loan vulnerability in {entry_point}: uncollateralized loan of \
                         {amount} succeeded without revert",
                        amount = section.loan_amount,
                    ),
                    self.name(),
                ));
            } else {
                tracing::debug!(%entry_point, reason = ?outcome.revert_reason, "flash loan protection held");
            }
        }

        Ok(findings)
    }
}

impl Default for FlashLoanProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    FlashLoanProbe,
    category: ProbeCategory::FlashLoan,
    name: "flash-loan-probe",
    description: "Requests oversized uncollateralized loans to check for missing caps"
);

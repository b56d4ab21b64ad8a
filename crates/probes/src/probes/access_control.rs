//! Access control probe.
//!
//! Calls each configured privileged entry point from an unprivileged
//! identity. A revert means the guard held; a success means anyone can call
//! the restricted path.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

pub struct AccessControlProbe;

impl AccessControlProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.access_control;
        let caller = ctx.unprivileged()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            if !target.has_entry_point(entry_point) {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            }

            let outcome = ctx.invoke(
                &Invocation::new(&target.id, entry_point).from_caller(&caller),
            )?;

            if outcome.succeeded() {
                findings.push(Finding::new(
                    ProbeCategory::AccessControl,
                    Severity::High,
                    format!(
                        "Access control bypass in {entry_point}: call from unprivileged identity \
                         {caller} succeeded",
                    ),
                    self.name(),
                ));
            } else {
                tracing::debug!(
                    %entry_point,
                    reason = ?outcome.revert_reason,
                    "access control held"
                );
            }
        }

        Ok(findings)
    }
}

impl Default for AccessControlProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    AccessControlProbe,
    category: ProbeCategory::AccessControl,
    name: "access-control-probe",
    description: "Verifies that restricted entry points reject unprivileged callers"
);

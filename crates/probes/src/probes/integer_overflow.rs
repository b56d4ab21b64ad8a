//! Integer boundary probe.
//!
//! Feeds each configured entry point a matrix of boundary inputs derived from
//! its declared word width: the maximum representable value, one below it,
//! one above it, zero, and minus one. A call that accepts an out-of-range
//! input without reverting is doing silent wrapping or truncation.

use crate::core::{Finding, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity};
use crate::harness::{CallArg, ExecutionContext, Invocation, TargetDescriptor};
use crate::impl_probe;

struct BoundaryCase {
    arg: CallArg,
    label: String,
    out_of_range: bool,
}

fn boundary_matrix(max: u128) -> Vec<BoundaryCase> {
    let mut cases = vec![
        BoundaryCase {
            arg: CallArg::Uint(max),
            label: max.to_string(),
            out_of_range: false,
        },
        BoundaryCase {
            arg: CallArg::Uint(max.saturating_sub(1)),
            label: max.saturating_sub(1).to_string(),
            out_of_range: false,
        },
    ];
    // One past the maximum is unrepresentable for full-width parameters; the
    // matrix simply loses that stimulus there.
    if let Some(over) = max.checked_add(1) {
        cases.push(BoundaryCase {
            arg: CallArg::Uint(over),
            label: over.to_string(),
            out_of_range: true,
        });
    }
    cases.push(BoundaryCase {
        arg: CallArg::Uint(0),
        label: "0".to_string(),
        out_of_range: false,
    });
    cases.push(BoundaryCase {
        arg: CallArg::Int(-1),
        label: "-1".to_string(),
        out_of_range: true,
    });
    cases
}

pub struct IntegerOverflowProbe;

impl IntegerOverflowProbe {
    pub fn new() -> Self {
        Self
    }

    fn run_impl(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError> {
        let section = &config.integer_overflow;
        let caller = ctx.owner()?.name.clone();
        let mut findings = Vec::new();

        for entry_point in &section.entry_points {
            let Some(declared) = target.entry_point(entry_point) else {
                tracing::debug!(target_id = %target.id, %entry_point, "entry point not declared, skipping");
                continue;
            };
            let param = declared
                .first_numeric_param()
                .ok_or_else(|| ProbeError::NoNumericParameter(entry_point.clone()))?;
            let max = param
                .max_value()
                .ok_or_else(|| ProbeError::NoNumericParameter(entry_point.clone()))?;

            for case in boundary_matrix(max) {
                let outcome = ctx.invoke(
                    &Invocation::new(&target.id, entry_point)
                        .from_caller(&caller)
                        .with_arg(case.arg),
                )?;

                if outcome.reverted {
                    // Expected rejection of an invalid input.
                    continue;
                }

                if case.out_of_range {
                    findings.push(Finding::new(
                        ProbeCategory::IntegerOverflow,
                        Severity::High,
                        format!(
                            "Integer overflow in {entry_point}: out-of-range input {} was accepted \
                             without revert",
                            case.label,
                        ),
                        self.name(),
                    ));
                }
            }
        }

        Ok(findings)
    }
}

impl Default for IntegerOverflowProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl_probe!(
    IntegerOverflowProbe,
    category: ProbeCategory::IntegerOverflow,
    name: "integer-overflow-probe",
    description: "Exercises boundary inputs and flags silent acceptance of out-of-range values"
);

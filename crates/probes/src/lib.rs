//! Tsuki Probes - Dynamic Vulnerability Probing Framework
//!
//! This crate drives vulnerability probes against a deployed target through
//! an execution harness and aggregates what they find — together with an
//! external static-analysis tool's diagnostics — into one severity-ranked
//! report. It is a heuristic scanner, not a formal verifier: probes classify
//! the outcomes of benign and adversarial calls against pass/fail rules, and
//! a revert is always read as evidence of a protected path.

pub mod core;
pub mod harness;
pub mod probes;
pub mod report;
pub mod runner;

pub use crate::core::{
    Finding, FindingCategory, Probe, ProbeCategory, ProbeConfig, ProbeError, Severity,
    SeverityCounts,
};

pub use crate::harness::{
    Behavior, ExecutionContext, Identity, Invocation, InvocationOutcome, Scenario,
    ScriptedContext, ScriptedTarget, TargetDescriptor,
};

pub use crate::probes::{
    AccessControlProbe, FlashLoanProbe, FrontRunningProbe, GasLimitProbe, IntegerOverflowProbe,
    OracleManipulationProbe, ReentrancyProbe, SlippageProbe,
};

pub use crate::report::{CategoryReport, ExternalDiagnostic, UnifiedReport};

pub use crate::runner::{IsolationPolicy, ProbeEngine, ProbeRegistry, ProbeRegistryBuilder};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_covers_every_category() {
        let engine = ProbeEngine::with_defaults();
        assert_eq!(engine.probes().len(), ProbeCategory::ALL.len());
    }
}

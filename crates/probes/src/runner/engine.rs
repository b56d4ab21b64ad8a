use crate::core::{HarnessError, Probe, ProbeCategory, ProbeConfig};
use crate::harness::{ExecutionContext, TargetDescriptor};
use crate::report::CategoryReport;
use crate::runner::{ProbeEvent, ProbeObserver, ProbeRegistry};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How target state is handled between probes within one run.
///
/// Probes issue real, state-mutating calls, so one probe's side effects can
/// contaminate the next probe's baseline. `SnapshotPerProbe` restores target
/// state after each probe when the context supports snapshots;
/// `SharedState` lets state accumulate across probes within the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationPolicy {
    SharedState,
    #[default]
    SnapshotPerProbe,
}

/// Drives every applicable probe against a target, sequentially and in
/// category order, isolating per-probe failures as failed category reports.
pub struct ProbeEngine {
    probes: Vec<Arc<dyn Probe>>,
    observers: Vec<Box<dyn ProbeObserver>>,
    isolation: IsolationPolicy,
}

impl ProbeEngine {
    pub fn new() -> Self {
        Self {
            probes: Vec::new(),
            observers: Vec::new(),
            isolation: IsolationPolicy::default(),
        }
    }

    /// Engine loaded with every built-in probe.
    pub fn with_defaults() -> Self {
        Self::new().with_registry(crate::runner::ProbeRegistryBuilder::new().with_defaults().build())
    }

    pub fn add_probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.probes.push(Arc::new(probe));
        self
    }

    pub fn with_probes(mut self, probes: Vec<Arc<dyn Probe>>) -> Self {
        self.probes.extend(probes);
        self
    }

    pub fn with_registry(mut self, registry: ProbeRegistry) -> Self {
        self.probes.extend(registry.all());
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn ProbeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn with_isolation(mut self, isolation: IsolationPolicy) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn probes(&self) -> &[Arc<dyn Probe>] {
        &self.probes
    }

    fn emit(&self, event: ProbeEvent<'_>) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Runs every probe the configuration enables. Categories with no
    /// configured entry points contribute no report at all; a probe error
    /// becomes a failed report for that category and the remaining probes
    /// still execute.
    pub fn run_all(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> BTreeMap<ProbeCategory, CategoryReport> {
        let mut reports = BTreeMap::new();
        let mut snapshots_unsupported = false;

        for probe in &self.probes {
            let category = probe.category();
            if !probe.is_applicable(config) {
                tracing::debug!(category = %category, "no entry points configured, skipping");
                continue;
            }

            self.emit(ProbeEvent::ProbeStarted { category });

            let snapshot = match self.isolation {
                IsolationPolicy::SharedState => None,
                IsolationPolicy::SnapshotPerProbe if snapshots_unsupported => None,
                IsolationPolicy::SnapshotPerProbe => match ctx.snapshot() {
                    Ok(id) => Some(id),
                    Err(HarnessError::SnapshotUnsupported) => {
                        tracing::warn!(
                            "execution context does not support snapshots, probes share state"
                        );
                        snapshots_unsupported = true;
                        None
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "snapshot failed, probe runs on shared state");
                        None
                    }
                },
            };

            let report = match probe.run(ctx, target, config) {
                Ok(findings) => {
                    for finding in &findings {
                        self.emit(ProbeEvent::FindingDetected {
                            category,
                            finding,
                        });
                    }
                    self.emit(ProbeEvent::ProbeCompleted {
                        category,
                        findings: findings.len(),
                    });
                    CategoryReport::from_findings(findings)
                }
                Err(err) => {
                    let message = err.to_string();
                    self.emit(ProbeEvent::ProbeFailed {
                        category,
                        error: &message,
                    });
                    CategoryReport::failed(message)
                }
            };

            if let Some(id) = snapshot {
                if let Err(err) = ctx.restore(id) {
                    tracing::warn!(error = %err, "failed to restore snapshot after probe");
                }
            }

            reports.insert(category, report);
        }

        reports
    }
}

impl Default for ProbeEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! Structured progress events.
//!
//! The engine narrates a run through typed events delivered to registered
//! observers instead of printing as it goes; the narrative renderer consumes
//! the finished report, not the event stream.

use crate::core::{Finding, ProbeCategory};

#[derive(Debug)]
pub enum ProbeEvent<'a> {
    ProbeStarted {
        category: ProbeCategory,
    },
    FindingDetected {
        category: ProbeCategory,
        finding: &'a Finding,
    },
    ProbeCompleted {
        category: ProbeCategory,
        findings: usize,
    },
    ProbeFailed {
        category: ProbeCategory,
        error: &'a str,
    },
}

pub trait ProbeObserver: Send + Sync {
    fn on_event(&self, event: &ProbeEvent<'_>);
}

/// Bridges probe events onto the `tracing` subscriber.
pub struct TracingObserver;

impl ProbeObserver for TracingObserver {
    fn on_event(&self, event: &ProbeEvent<'_>) {
        match event {
            ProbeEvent::ProbeStarted { category } => {
                tracing::info!(category = %category, "probe started");
            }
            ProbeEvent::FindingDetected { category, finding } => {
                tracing::warn!(
                    category = %category,
                    severity = %finding.severity,
                    description = %finding.description,
                    "finding detected"
                );
            }
            ProbeEvent::ProbeCompleted { category, findings } => {
                tracing::info!(category = %category, findings, "probe completed");
            }
            ProbeEvent::ProbeFailed { category, error } => {
                tracing::error!(category = %category, error = %error, "probe failed");
            }
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised by an execution context that are not modeled as reverts.
///
/// A revert is never an error: it travels back to the probe inside
/// [`crate::harness::InvocationOutcome`] and is interpreted per-category.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("unknown entry point {entry_point} on target {target}")]
    UnknownEntryPoint { target: String, entry_point: String },

    #[error("unknown caller identity: {0}")]
    UnknownIdentity(String),

    #[error("execution context has no unprivileged identity")]
    NoUnprivilegedIdentity,

    #[error("execution context has no privileged identity")]
    NoPrivilegedIdentity,

    #[error("state snapshots are not supported by this execution context")]
    SnapshotUnsupported,

    #[error("no such snapshot: {0}")]
    UnknownSnapshot(u64),
}

/// An unexpected failure while running a probe. Captured by the engine as a
/// failed category report; never aborts the remaining categories.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe configuration: {0}")]
    InvalidConfig(String),

    #[error("entry point {0} declares no numeric parameter")]
    NoNumericParameter(String),

    #[error(transparent)]
    Harness(#[from] HarnessError),
}

/// Failure modes of the external diagnostics tool. All of them are soft: the
/// run proceeds with zero external findings.
#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("diagnostics tool not found: {0}")]
    NotFound(String),

    #[error("diagnostics tool timed out after {0} seconds")]
    Timeout(u64),

    #[error("diagnostics tool exited with status {0}")]
    Failed(i32),

    #[error("failed to parse diagnostics output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writing a report artifact failed. Fatal for that artifact only; a sibling
/// artifact that was already written is not rolled back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

//! Timeout-bounded invocation of the external diagnostics tool.
//!
//! The tool is an optional collaborator: every failure mode — missing binary,
//! nonzero exit, timeout, unparseable output — degrades to an empty findings
//! list so the probe report still ships.

use crate::core::{ExternalToolError, Finding};
use crate::report::external::{normalize_diagnostics, parse_diagnostics, ExternalDiagnostic};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs `<tool> <contracts> --json <tmp>` and parses the produced file.
pub fn run_diagnostics_tool(
    tool: &str,
    contracts: &Path,
    timeout: Duration,
) -> Result<Vec<ExternalDiagnostic>, ExternalToolError> {
    let output_dir = tempfile::tempdir()?;
    let output_path = output_dir.path().join("diagnostics.json");

    let mut child = Command::new(tool)
        .arg(contracts)
        .arg("--json")
        .arg(&output_path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ExternalToolError::NotFound(tool.to_string())
            } else {
                ExternalToolError::Io(err)
            }
        })?;

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExternalToolError::Timeout(timeout.as_secs()));
        }
    };

    if !status.success() {
        return Err(ExternalToolError::Failed(status.code().unwrap_or(-1)));
    }

    let raw = std::fs::read_to_string(&output_path)?;
    Ok(parse_diagnostics(&raw)?)
}

/// Soft wrapper: any tool failure is logged and yields zero external
/// findings rather than aborting the run.
pub fn collect_external_findings(
    tool: &str,
    contracts: &Path,
    timeout: Duration,
) -> Vec<Finding> {
    match run_diagnostics_tool(tool, contracts, timeout) {
        Ok(diagnostics) => {
            tracing::info!(tool, count = diagnostics.len(), "external diagnostics collected");
            normalize_diagnostics(diagnostics, tool)
        }
        Err(err) => {
            tracing::warn!(tool, error = %err, "external diagnostics unavailable, proceeding without");
            Vec::new()
        }
    }
}

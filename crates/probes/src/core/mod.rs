//! Core abstractions for the probing framework
//!
//! The Probe trait defines the interface all detectors implement, the
//! finding/severity model is the currency every layer trades in, and the
//! typed error taxonomy keeps probe-local failures from ever aborting a run.

pub mod category;
pub mod config;
pub mod error;
pub mod finding;
pub mod probe;
pub mod severity;

pub use category::ProbeCategory;
pub use config::{
    AccessControlConfig, FlashLoanConfig, FrontRunningConfig, GasLimitConfig,
    IntegerOverflowConfig, OracleConfig, ProbeConfig, ReentrancyConfig, SlippageConfig,
};
pub use error::{ExternalToolError, HarnessError, PersistenceError, ProbeError};
pub use finding::{Finding, FindingCategory};
pub use probe::Probe;
pub use severity::{Severity, SeverityCounts};

//! Command implementations for the tsuki CLI
//!
//! `audit` is the workhorse: it loads a scenario, drives every configured
//! probe against the target, folds in external diagnostics, and persists both
//! report artifacts. `probes` lists the registry and `render` re-renders a
//! stored JSON report for humans.

pub mod audit;
pub mod probes;
pub mod render;

//! Probe trait and architecture for pluggable vulnerability detection.
//!
//! Each probe owns one vulnerability category and drives real calls against
//! the target through an [`ExecutionContext`]. Probes are independent: adding
//! a new category never touches existing detectors, and a run can enable any
//! subset by configuring entry points for just those categories.
//!
//! Probes classify call outcomes rather than raising on them: a revert during
//! a stimulus means the path is protected and is never escalated to a
//! finding. Only faults outside the category's model (bad configuration, a
//! malformed target interface) surface as [`ProbeError`] to the engine.

use crate::core::{Finding, ProbeCategory, ProbeConfig, ProbeError};
use crate::harness::{ExecutionContext, TargetDescriptor};

pub trait Probe: Send + Sync {
    fn category(&self) -> ProbeCategory;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "No description provided"
    }

    /// Whether the configuration gives this probe any work. Categories where
    /// this returns false contribute no category report at all.
    fn is_applicable(&self, config: &ProbeConfig) -> bool {
        config.is_configured(self.category())
    }

    fn run(
        &self,
        ctx: &mut dyn ExecutionContext,
        target: &TargetDescriptor,
        config: &ProbeConfig,
    ) -> Result<Vec<Finding>, ProbeError>;
}

#[macro_export]
macro_rules! impl_probe {
    (
        $probe:ty,
        category: $category:expr,
        name: $name:expr
        $(, description: $description:expr)?
    ) => {
        impl $crate::core::Probe for $probe {
            fn category(&self) -> $crate::core::ProbeCategory {
                $category
            }

            fn name(&self) -> &'static str {
                $name
            }

            $(
                fn description(&self) -> &'static str {
                    $description
                }
            )?

            fn run(
                &self,
                ctx: &mut dyn $crate::harness::ExecutionContext,
                target: &$crate::harness::TargetDescriptor,
                config: &$crate::core::ProbeConfig,
            ) -> Result<Vec<$crate::core::Finding>, $crate::core::ProbeError> {
                self.run_impl(ctx, target, config)
            }
        }
    };
}

//! The built-in vulnerability probes, one module per category.

pub mod access_control;
pub mod flash_loan;
pub mod front_running;
pub mod gas_limit;
pub mod integer_overflow;
pub mod oracle_manipulation;
pub mod reentrancy;
pub mod slippage;

pub use access_control::AccessControlProbe;
pub use flash_loan::FlashLoanProbe;
pub use front_running::FrontRunningProbe;
pub use gas_limit::GasLimitProbe;
pub use integer_overflow::IntegerOverflowProbe;
pub use oracle_manipulation::OracleManipulationProbe;
pub use reentrancy::ReentrancyProbe;
pub use slippage::SlippageProbe;

use crate::core::Probe;
use std::sync::Arc;

/// One instance of every built-in probe, in category order.
pub fn default_probes() -> Vec<Arc<dyn Probe>> {
    vec![
        Arc::new(ReentrancyProbe::new()),
        Arc::new(IntegerOverflowProbe::new()),
        Arc::new(AccessControlProbe::new()),
        Arc::new(GasLimitProbe::new()),
        Arc::new(FrontRunningProbe::new()),
        Arc::new(OracleManipulationProbe::new()),
        Arc::new(SlippageProbe::new()),
        Arc::new(FlashLoanProbe::new()),
    ]
}

use crate::core::ProbeCategory;
use serde::{Deserialize, Serialize};

const WEI: u128 = 1_000_000_000_000_000_000;

/// Per-run probe configuration: which entry points each category should
/// exercise, plus the category-specific scalars. A category with no entry
/// points configured is skipped entirely by the engine.
///
/// Read-only for the duration of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub reentrancy: ReentrancyConfig,
    pub integer_overflow: IntegerOverflowConfig,
    pub access_control: AccessControlConfig,
    pub gas_limit: GasLimitConfig,
    pub front_running: FrontRunningConfig,
    pub oracle_manipulation: OracleConfig,
    pub slippage: SlippageConfig,
    pub flash_loan: FlashLoanConfig,
}

impl ProbeConfig {
    pub fn entry_points(&self, category: ProbeCategory) -> &[String] {
        match category {
            ProbeCategory::Reentrancy => &self.reentrancy.entry_points,
            ProbeCategory::IntegerOverflow => &self.integer_overflow.entry_points,
            ProbeCategory::AccessControl => &self.access_control.entry_points,
            ProbeCategory::GasLimit => &self.gas_limit.entry_points,
            ProbeCategory::FrontRunning => &self.front_running.entry_points,
            ProbeCategory::OracleManipulation => &self.oracle_manipulation.entry_points,
            ProbeCategory::Slippage => &self.slippage.entry_points,
            ProbeCategory::FlashLoan => &self.flash_loan.entry_points,
        }
    }

    /// Whether the category has any work to do this run.
    pub fn is_configured(&self, category: ProbeCategory) -> bool {
        !self.entry_points(category).is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReentrancyConfig {
    pub entry_points: Vec<String>,
    /// Value attached to the stimulus call; the expected post-call balance is
    /// the pre-call balance plus this amount.
    pub deposit_amount: u128,
}

impl Default for ReentrancyConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            deposit_amount: 1_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerOverflowConfig {
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Entry points that are supposed to be restricted to privileged callers.
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GasLimitConfig {
    pub entry_points: Vec<String>,
    /// Escalating iteration counts fed to each entry point.
    pub iteration_steps: Vec<u64>,
    /// Gas usage above this mark is reported even when the call succeeds.
    pub gas_high_water: u64,
}

impl Default for GasLimitConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            iteration_steps: vec![100, 500, 1_000, 5_000],
            gas_high_water: 8_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontRunningConfig {
    pub entry_points: Vec<String>,
    /// Value attached to the competing invocations.
    pub trade_value: u128,
    /// Priority-fee increment given to the second, competing invocation.
    pub priority_fee_bump: u64,
}

impl Default for FrontRunningConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            trade_value: 1_000,
            priority_fee_bump: 1_000_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub entry_points: Vec<String>,
    /// A price source reporting exactly this value is assumed to be a fixed
    /// test constant rather than a live feed.
    pub sentinel_price: u128,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            sentinel_price: 1_000 * WEI,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlippageConfig {
    pub entry_points: Vec<String>,
    /// Disproportionately large swap amount used as the stimulus.
    pub swap_amount: u128,
}

impl Default for SlippageConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            swap_amount: 1_000_000 * WEI,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashLoanConfig {
    pub entry_points: Vec<String>,
    /// Disproportionately large loan amount used as the stimulus.
    pub loan_amount: u128,
}

impl Default for FlashLoanConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            loan_amount: 1_000_000 * WEI,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_enables_nothing() {
        let config = ProbeConfig::default();
        for category in ProbeCategory::ALL {
            assert!(!config.is_configured(category));
        }
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: ProbeConfig = serde_json::from_str(
            r#"{
                "access_control": { "entry_points": ["emergencyWithdraw", "transferOwnership"] },
                "gas_limit": { "entry_points": ["distributeToAll"], "gas_high_water": 4000000 }
            }"#,
        )
        .unwrap();

        assert!(config.is_configured(ProbeCategory::AccessControl));
        assert!(config.is_configured(ProbeCategory::GasLimit));
        assert!(!config.is_configured(ProbeCategory::Reentrancy));
        assert_eq!(config.gas_limit.gas_high_water, 4_000_000);
        assert_eq!(config.gas_limit.iteration_steps, vec![100, 500, 1_000, 5_000]);
    }
}

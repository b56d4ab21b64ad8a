use serde::{Deserialize, Serialize};
use std::fmt;

/// The vulnerability categories the built-in probes cover. Declaration order
/// is execution order and report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCategory {
    Reentrancy,
    IntegerOverflow,
    AccessControl,
    GasLimit,
    FrontRunning,
    OracleManipulation,
    Slippage,
    FlashLoan,
}

impl ProbeCategory {
    pub const ALL: [ProbeCategory; 8] = [
        ProbeCategory::Reentrancy,
        ProbeCategory::IntegerOverflow,
        ProbeCategory::AccessControl,
        ProbeCategory::GasLimit,
        ProbeCategory::FrontRunning,
        ProbeCategory::OracleManipulation,
        ProbeCategory::Slippage,
        ProbeCategory::FlashLoan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeCategory::Reentrancy => "reentrancy",
            ProbeCategory::IntegerOverflow => "integer_overflow",
            ProbeCategory::AccessControl => "access_control",
            ProbeCategory::GasLimit => "gas_limit",
            ProbeCategory::FrontRunning => "front_running",
            ProbeCategory::OracleManipulation => "oracle_manipulation",
            ProbeCategory::Slippage => "slippage",
            ProbeCategory::FlashLoan => "flash_loan",
        }
    }
}

impl fmt::Display for ProbeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_category() {
        assert_eq!(ProbeCategory::ALL.len(), 8);
        assert_eq!(ProbeCategory::ALL[0], ProbeCategory::Reentrancy);
        assert_eq!(ProbeCategory::ALL[7], ProbeCategory::FlashLoan);
    }

    #[test]
    fn test_wire_form() {
        let json = serde_json::to_string(&ProbeCategory::AccessControl).unwrap();
        assert_eq!(json, "\"access_control\"");
    }
}

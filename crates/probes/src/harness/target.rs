//! Explicit capability descriptors for targets.
//!
//! A probe checks the descriptor before dispatching: an entry point that the
//! target does not declare is "not applicable" and skipped silently, never a
//! runtime fault. This replaces reflective has-this-method checks with data.

use serde::{Deserialize, Serialize};

/// Shape of one entry-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    Uint { bits: u8 },
    Int { bits: u8 },
    Address,
    Bool,
}

impl ParamKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ParamKind::Uint { .. } | ParamKind::Int { .. })
    }

    /// Largest value representable in this parameter, for numeric kinds.
    /// Widths are capped at 128 bits, the harness word size.
    pub fn max_value(&self) -> Option<u128> {
        match self {
            ParamKind::Uint { bits } => Some(word_max(*bits)),
            ParamKind::Int { bits } => {
                let bits = (*bits).min(128);
                Some(word_max(bits.saturating_sub(1)))
            }
            _ => None,
        }
    }
}

fn word_max(bits: u8) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamKind>,
    /// Whether the entry point accepts an attached native value.
    #[serde(default)]
    pub payable: bool,
}

impl EntryPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            payable: false,
        }
    }

    pub fn with_param(mut self, param: ParamKind) -> Self {
        self.params.push(param);
        self
    }

    pub fn payable(mut self) -> Self {
        self.payable = true;
        self
    }

    pub fn first_numeric_param(&self) -> Option<&ParamKind> {
        self.params.iter().find(|param| param.is_numeric())
    }
}

/// The set of invocable entry points a target declares, keyed by the target
/// identity used in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub id: String,
    pub entry_points: Vec<EntryPoint>,
}

impl TargetDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entry_points: Vec::new(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_points.push(entry_point);
        self
    }

    pub fn entry_point(&self, name: &str) -> Option<&EntryPoint> {
        self.entry_points.iter().find(|ep| ep.name == name)
    }

    pub fn has_entry_point(&self, name: &str) -> bool {
        self.entry_point(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_max_values() {
        assert_eq!(ParamKind::Uint { bits: 8 }.max_value(), Some(255));
        assert_eq!(ParamKind::Uint { bits: 64 }.max_value(), Some(u64::MAX as u128));
        assert_eq!(ParamKind::Uint { bits: 128 }.max_value(), Some(u128::MAX));
        assert_eq!(ParamKind::Address.max_value(), None);
    }

    #[test]
    fn test_descriptor_lookup() {
        let descriptor = TargetDescriptor::new("VulnerableVault")
            .with_entry_point(
                EntryPoint::new("withdraw")
                    .with_param(ParamKind::Uint { bits: 64 })
                    .payable(),
            )
            .with_entry_point(EntryPoint::new("getTokenPrice"));

        assert!(descriptor.has_entry_point("withdraw"));
        assert!(!descriptor.has_entry_point("selfDestruct"));
        let withdraw = descriptor.entry_point("withdraw").unwrap();
        assert!(withdraw.first_numeric_param().is_some());
    }
}

//! Scripted in-memory execution context.
//!
//! Stands in for a live chain the way a programmable mock stands in for a
//! remote service: each target entry point is scripted with a [`Behavior`]
//! that decides how calls resolve (accept, revert, gate on the caller, burn
//! gas, leak balance). Scenario files deserialize straight into this module,
//! so the CLI and the test suite can exercise the full pipeline without
//! deploying anything.

use crate::core::{HarnessError, ProbeConfig};
use crate::harness::{
    CallArg, EmittedEvent, EntryPoint, ExecutionContext, Identity, Invocation,
    InvocationOutcome, ParamKind, SnapshotId, TargetDescriptor,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BASE_GAS: u64 = 21_000;

fn default_gas() -> u64 {
    BASE_GAS
}

/// How a scripted entry point resolves incoming calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// Accept the call, crediting any attached value.
    Accept {
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Revert unconditionally.
    Revert { reason: String },
    /// Revert unless the caller is a privileged identity.
    OwnerGated {
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Accept the call, then pay out more than was put in — the observable
    /// signature of a drain through an unexpected extra transfer.
    LeakyWithdraw {
        leak: u128,
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Validate numeric arguments against the declared parameter width and
    /// revert on out-of-range input.
    CheckedArithmetic {
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Silently truncate out-of-range numeric input instead of reverting.
    UncheckedArithmetic {
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Gas grows linearly with the requested iteration count; exceeding the
    /// limit fails with an out-of-gas revert.
    LinearGas {
        gas_per_iteration: u64,
        #[serde(default = "default_gas")]
        base_gas: u64,
        gas_limit: u64,
    },
    /// Read-style entry point returning a constant scalar.
    ConstantValue {
        value: u128,
        #[serde(default = "default_gas")]
        gas: u64,
    },
    /// Accept amounts up to a cap and revert above it.
    BoundedAmount {
        max_amount: u128,
        #[serde(default = "default_gas")]
        gas: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEntryPoint {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamKind>,
    #[serde(default)]
    pub payable: bool,
    pub behavior: Behavior,
}

impl ScriptedEntryPoint {
    pub fn new(name: impl Into<String>, behavior: Behavior) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            payable: false,
            behavior,
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

    fn out_of_range_arg(&self, args: &[CallArg]) -> Option<String> {
        for (index, arg) in args.iter().enumerate() {
            let Some(param) = self.params.get(index).filter(|p| p.is_numeric()) else {
                continue;
            };
            match arg {
                CallArg::Int(value) if *value < 0 => {
                    if matches!(param, ParamKind::Uint { .. }) {
                        return Some(format!("value {value} underflows parameter {index}"));
                    }
                }
                CallArg::Uint(value) => {
                    if param.max_value().is_some_and(|max| *value > max) {
                        return Some(format!("value {value} overflows parameter {index}"));
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedTarget {
    pub id: String,
    #[serde(default)]
    pub balance: u128,
    #[serde(default)]
    pub mappings: BTreeMap<String, u128>,
    pub entry_points: Vec<ScriptedEntryPoint>,
}

impl ScriptedTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance: 0,
            mappings: BTreeMap::new(),
            entry_points: Vec::new(),
        }
    }

    pub fn with_balance(mut self, balance: u128) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_mapping(mut self, key: impl Into<String>, value: u128) -> Self {
        self.mappings.insert(key.into(), value);
        self
    }

    pub fn with_entry_point(mut self, entry_point: ScriptedEntryPoint) -> Self {
        self.entry_points.push(entry_point);
        self
    }

    /// Capability descriptor for this target, as probes see it.
    pub fn descriptor(&self) -> TargetDescriptor {
        let mut descriptor = TargetDescriptor::new(self.id.clone());
        for scripted in &self.entry_points {
            let mut entry_point = EntryPoint::new(scripted.name.clone());
            entry_point.params = scripted.params.clone();
            entry_point.payable = scripted.payable;
            descriptor = descriptor.with_entry_point(entry_point);
        }
        descriptor
    }

    fn entry_point(&self, name: &str) -> Option<ScriptedEntryPoint> {
        self.entry_points.iter().find(|ep| ep.name == name).cloned()
    }

    fn credit(&mut self, call: &Invocation, outcome: InvocationOutcome) -> InvocationOutcome {
        if call.value == 0 {
            return outcome;
        }
        self.balance = self.balance.saturating_add(call.value);
        outcome.with_event(
            EmittedEvent::new("Deposit")
                .with_attribute("from", call.caller.clone())
                .with_attribute("amount", call.value.to_string()),
        )
    }

    fn execute(
        &mut self,
        entry: &ScriptedEntryPoint,
        caller: &Identity,
        call: &Invocation,
    ) -> InvocationOutcome {
        match &entry.behavior {
            Behavior::Accept { gas } => self.credit(call, InvocationOutcome::success(*gas)),
            Behavior::Revert { reason } => InvocationOutcome::reverted(reason.clone(), BASE_GAS),
            Behavior::OwnerGated { gas } => {
                if caller.privileged {
                    self.credit(call, InvocationOutcome::success(*gas))
                } else {
                    InvocationOutcome::reverted("caller is not the owner", BASE_GAS)
                }
            }
            Behavior::LeakyWithdraw { leak, gas } => {
                let outcome = self.credit(call, InvocationOutcome::success(*gas));
                let drained = call.value.saturating_add(*leak).min(self.balance);
                self.balance -= drained;
                outcome.with_event(
                    EmittedEvent::new("Withdrawal")
                        .with_attribute("to", call.caller.clone())
                        .with_attribute("amount", drained.to_string()),
                )
            }
            Behavior::CheckedArithmetic { gas } => match entry.out_of_range_arg(&call.args) {
                Some(detail) => InvocationOutcome::reverted(
                    format!("arithmetic overflow: {detail}"),
                    BASE_GAS,
                ),
                None => self.credit(call, InvocationOutcome::success(*gas)),
            },
            Behavior::UncheckedArithmetic { gas } => {
                self.credit(call, InvocationOutcome::success(*gas))
            }
            Behavior::LinearGas {
                gas_per_iteration,
                base_gas,
                gas_limit,
            } => {
                let iterations = call
                    .args
                    .iter()
                    .find_map(CallArg::as_uint)
                    .unwrap_or(0)
                    .min(u64::MAX as u128) as u64;
                let gas = base_gas.saturating_add(gas_per_iteration.saturating_mul(iterations));
                if gas > *gas_limit {
                    InvocationOutcome::reverted("out of gas", *gas_limit)
                } else {
                    self.credit(call, InvocationOutcome::success(gas))
                }
            }
            Behavior::ConstantValue { value, gas } => {
                InvocationOutcome::success(*gas).with_return_value(*value)
            }
            Behavior::BoundedAmount { max_amount, gas } => {
                let amount = call
                    .args
                    .iter()
                    .find_map(CallArg::as_uint)
                    .unwrap_or(call.value);
                if amount > *max_amount {
                    InvocationOutcome::reverted("amount exceeds limit", BASE_GAS)
                } else {
                    self.credit(call, InvocationOutcome::success(*gas))
                }
            }
        }
    }
}

/// In-memory [`ExecutionContext`] over scripted targets, with snapshot and
/// restore support.
#[derive(Debug, Clone)]
pub struct ScriptedContext {
    identities: Vec<Identity>,
    targets: BTreeMap<String, ScriptedTarget>,
    snapshots: BTreeMap<SnapshotId, BTreeMap<String, ScriptedTarget>>,
    next_snapshot: SnapshotId,
}

impl ScriptedContext {
    /// Context with the stock identity set: a privileged owner plus two
    /// unprivileged accounts.
    pub fn new() -> Self {
        Self {
            identities: Self::default_identities(),
            targets: BTreeMap::new(),
            snapshots: BTreeMap::new(),
            next_snapshot: 0,
        }
    }

    pub fn default_identities() -> Vec<Identity> {
        vec![
            Identity::new("owner", "0x0000000000000000000000000000000000000001").privileged(),
            Identity::new("attacker", "0x0000000000000000000000000000000000000002"),
            Identity::new("user", "0x0000000000000000000000000000000000000003"),
        ]
    }

    pub fn with_identities(mut self, identities: Vec<Identity>) -> Self {
        if !identities.is_empty() {
            self.identities = identities;
        }
        self
    }

    pub fn with_target(mut self, target: ScriptedTarget) -> Self {
        self.targets.insert(target.id.clone(), target);
        self
    }

    pub fn target(&self, id: &str) -> Option<&ScriptedTarget> {
        self.targets.get(id)
    }
}

impl Default for ScriptedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext for ScriptedContext {
    fn identities(&self) -> &[Identity] {
        &self.identities
    }

    fn invoke(&mut self, call: &Invocation) -> Result<InvocationOutcome, HarnessError> {
        let caller = self
            .identities
            .iter()
            .find(|identity| identity.name == call.caller)
            .cloned()
            .ok_or_else(|| HarnessError::UnknownIdentity(call.caller.clone()))?;

        let target = self
            .targets
            .get_mut(&call.target)
            .ok_or_else(|| HarnessError::UnknownTarget(call.target.clone()))?;

        let entry = target.entry_point(&call.entry_point).ok_or_else(|| {
            HarnessError::UnknownEntryPoint {
                target: call.target.clone(),
                entry_point: call.entry_point.clone(),
            }
        })?;

        Ok(target.execute(&entry, &caller, call))
    }

    fn balance_of(&self, target: &str) -> Result<u128, HarnessError> {
        self.targets
            .get(target)
            .map(|t| t.balance)
            .ok_or_else(|| HarnessError::UnknownTarget(target.to_string()))
    }

    fn mapping_value(&self, target: &str, key: &str) -> Result<u128, HarnessError> {
        self.targets
            .get(target)
            .map(|t| t.mappings.get(key).copied().unwrap_or(0))
            .ok_or_else(|| HarnessError::UnknownTarget(target.to_string()))
    }

    fn snapshot(&mut self) -> Result<SnapshotId, HarnessError> {
        let id = self.next_snapshot;
        self.next_snapshot += 1;
        self.snapshots.insert(id, self.targets.clone());
        Ok(id)
    }

    fn restore(&mut self, snapshot: SnapshotId) -> Result<(), HarnessError> {
        let state = self
            .snapshots
            .remove(&snapshot)
            .ok_or(HarnessError::UnknownSnapshot(snapshot))?;
        self.targets = state;
        Ok(())
    }
}

/// A self-contained run description: identities, one scripted target, and the
/// probe configuration to drive against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub identities: Vec<Identity>,
    pub target: ScriptedTarget,
    #[serde(default)]
    pub probes: ProbeConfig,
}

impl Scenario {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn context(&self) -> ScriptedContext {
        ScriptedContext::new()
            .with_identities(self.identities.clone())
            .with_target(self.target.clone())
    }

    pub fn descriptor(&self) -> TargetDescriptor {
        self.target.descriptor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> ScriptedTarget {
        ScriptedTarget::new("vault")
            .with_balance(10_000)
            .with_entry_point(
                ScriptedEntryPoint::new("withdraw", Behavior::LeakyWithdraw { leak: 500, gas: 40_000 })
                    .with_param(ParamKind::Uint { bits: 64 })
                    .payable(),
            )
            .with_entry_point(ScriptedEntryPoint::new(
                "emergencyWithdraw",
                Behavior::OwnerGated { gas: 30_000 },
            ))
    }

    #[test]
    fn test_owner_gated_behavior() -> anyhow::Result<()> {
        let mut ctx = ScriptedContext::new().with_target(vault());

        let denied = ctx.invoke(
            &Invocation::new("vault", "emergencyWithdraw").from_caller("attacker"),
        )?;
        assert!(denied.reverted);

        let allowed = ctx.invoke(
            &Invocation::new("vault", "emergencyWithdraw").from_caller("owner"),
        )?;
        assert!(allowed.succeeded());
        Ok(())
    }

    #[test]
    fn test_leaky_withdraw_drains_balance() -> anyhow::Result<()> {
        let mut ctx = ScriptedContext::new().with_target(vault());

        let before = ctx.balance_of("vault")?;
        let outcome = ctx.invoke(
            &Invocation::new("vault", "withdraw")
                .from_caller("attacker")
                .with_value(1_000),
        )?;
        assert!(outcome.succeeded());
        assert!(ctx.balance_of("vault")? < before + 1_000);
        Ok(())
    }

    #[test]
    fn test_snapshot_restore_round_trip() -> anyhow::Result<()> {
        let mut ctx = ScriptedContext::new().with_target(vault());

        let before = ctx.balance_of("vault")?;
        let snapshot = ctx.snapshot()?;
        ctx.invoke(
            &Invocation::new("vault", "withdraw")
                .from_caller("user")
                .with_value(200),
        )?;
        assert_ne!(ctx.balance_of("vault")?, before);

        ctx.restore(snapshot)?;
        assert_eq!(ctx.balance_of("vault")?, before);
        Ok(())
    }

    #[test]
    fn test_unknown_entry_point_is_a_hard_error() {
        let mut ctx = ScriptedContext::new().with_target(vault());
        let result = ctx.invoke(&Invocation::new("vault", "selfDestruct").from_caller("owner"));
        assert!(matches!(
            result,
            Err(HarnessError::UnknownEntryPoint { .. })
        ));
    }
}

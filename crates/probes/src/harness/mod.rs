//! Execution harness: the capability surface probes use to drive a target.
//!
//! An [`ExecutionContext`] owns a set of identities and can issue real,
//! state-mutating calls against named entry points of a target. Call results
//! come back as data — [`InvocationOutcome`] carries the revert flag instead
//! of an error, so probes branch on outcomes rather than catching exceptions.
//! No probe reads ambient global state: the context is passed explicitly into
//! every probe invocation.

pub mod scripted;
pub mod target;

use crate::core::HarnessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use scripted::{Behavior, Scenario, ScriptedContext, ScriptedEntryPoint, ScriptedTarget};
pub use target::{EntryPoint, ParamKind, TargetDescriptor};

/// An account the harness can issue calls from. Every context carries at
/// least one privileged owner identity and one unprivileged identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub privileged: bool,
}

impl Identity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            privileged: false,
        }
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }
}

/// A scalar argument passed to a target entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallArg {
    Uint(u128),
    Int(i128),
    Bool(bool),
}

impl CallArg {
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            CallArg::Uint(value) => Some(*value),
            _ => None,
        }
    }
}

/// One call against a target entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub target: String,
    pub entry_point: String,
    pub args: Vec<CallArg>,
    /// Name of the identity issuing the call.
    pub caller: String,
    /// Native value attached to the call.
    pub value: u128,
    /// Fee priority relative to competing calls; only ordering matters.
    pub priority_fee: u64,
}

impl Invocation {
    pub fn new(target: impl Into<String>, entry_point: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            entry_point: entry_point.into(),
            args: Vec::new(),
            caller: String::new(),
            value: 0,
            priority_fee: 0,
        }
    }

    pub fn from_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = caller.into();
        self
    }

    pub fn with_arg(mut self, arg: CallArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    pub fn with_priority_fee(mut self, priority_fee: u64) -> Self {
        self.priority_fee = priority_fee;
        self
    }
}

/// An event the target emitted while executing a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl EmittedEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The structured result of one invocation. A revert is an ordinary outcome,
/// not an error; probes interpret it per-category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    pub reverted: bool,
    pub revert_reason: Option<String>,
    pub gas_used: u64,
    /// Scalar returned by read-style entry points, when the target produced one.
    pub return_value: Option<u128>,
    pub events: Vec<EmittedEvent>,
}

impl InvocationOutcome {
    pub fn success(gas_used: u64) -> Self {
        Self {
            gas_used,
            ..Self::default()
        }
    }

    pub fn reverted(reason: impl Into<String>, gas_used: u64) -> Self {
        Self {
            reverted: true,
            revert_reason: Some(reason.into()),
            gas_used,
            ..Self::default()
        }
    }

    pub fn with_return_value(mut self, value: u128) -> Self {
        self.return_value = Some(value);
        self
    }

    pub fn with_event(mut self, event: EmittedEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn succeeded(&self) -> bool {
        !self.reverted
    }

    /// Whether the revert was caused by resource exhaustion rather than a guard.
    pub fn out_of_gas(&self) -> bool {
        self.reverted
            && self
                .revert_reason
                .as_deref()
                .is_some_and(|reason| reason.to_lowercase().contains("out of gas"))
    }
}

pub type SnapshotId = u64;

/// Capability surface over the target environment.
///
/// Implementations issue real calls with observable side effects; the engine
/// therefore runs probes strictly one at a time against a shared context.
pub trait ExecutionContext {
    fn identities(&self) -> &[Identity];

    fn invoke(&mut self, call: &Invocation) -> Result<InvocationOutcome, HarnessError>;

    fn balance_of(&self, target: &str) -> Result<u128, HarnessError>;

    fn mapping_value(&self, target: &str, key: &str) -> Result<u128, HarnessError>;

    /// Capture current target state so a later [`restore`](Self::restore) can
    /// roll it back. Contexts without this capability report
    /// [`HarnessError::SnapshotUnsupported`].
    fn snapshot(&mut self) -> Result<SnapshotId, HarnessError> {
        Err(HarnessError::SnapshotUnsupported)
    }

    fn restore(&mut self, _snapshot: SnapshotId) -> Result<(), HarnessError> {
        Err(HarnessError::SnapshotUnsupported)
    }

    fn owner(&self) -> Result<&Identity, HarnessError> {
        self.identities()
            .iter()
            .find(|identity| identity.privileged)
            .ok_or(HarnessError::NoPrivilegedIdentity)
    }

    fn unprivileged(&self) -> Result<&Identity, HarnessError> {
        self.identities()
            .iter()
            .find(|identity| !identity.privileged)
            .ok_or(HarnessError::NoUnprivilegedIdentity)
    }
}

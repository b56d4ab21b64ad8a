//! Probe orchestration: registry, sequential engine, progress events.

pub mod engine;
pub mod observer;
pub mod registry;

pub use engine::{IsolationPolicy, ProbeEngine};
pub use observer::{ProbeEvent, ProbeObserver, TracingObserver};
pub use registry::{ProbeRegistry, ProbeRegistryBuilder};

use crate::core::{Probe, ProbeCategory};
use crate::probes::default_probes;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One probe instance per category. Keyed by category in a `BTreeMap` so
/// iteration — and therefore execution and report order — is deterministic.
pub struct ProbeRegistry {
    probes: BTreeMap<ProbeCategory, Arc<dyn Probe>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self {
            probes: BTreeMap::new(),
        }
    }

    pub fn register<P: Probe + 'static>(&mut self, probe: P) {
        self.probes.insert(probe.category(), Arc::new(probe));
    }

    pub fn register_shared(&mut self, probe: Arc<dyn Probe>) {
        self.probes.insert(probe.category(), probe);
    }

    pub fn get(&self, category: ProbeCategory) -> Option<Arc<dyn Probe>> {
        self.probes.get(&category).cloned()
    }

    /// All registered probes in category order.
    pub fn all(&self) -> Vec<Arc<dyn Probe>> {
        self.probes.values().cloned().collect()
    }

    pub fn categories(&self) -> Vec<ProbeCategory> {
        self.probes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ProbeRegistryBuilder {
    registry: ProbeRegistry,
}

impl ProbeRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ProbeRegistry::new(),
        }
    }

    pub fn with_probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.registry.register(probe);
        self
    }

    /// Registers every built-in probe.
    pub fn with_defaults(mut self) -> Self {
        for probe in default_probes() {
            self.registry.register_shared(probe);
        }
        self
    }

    pub fn build(self) -> ProbeRegistry {
        self.registry
    }
}

impl Default for ProbeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_category() {
        let registry = ProbeRegistryBuilder::new().with_defaults().build();
        assert_eq!(registry.len(), ProbeCategory::ALL.len());
        assert_eq!(registry.categories(), ProbeCategory::ALL.to_vec());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProbeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(ProbeCategory::Reentrancy).is_none());
    }
}

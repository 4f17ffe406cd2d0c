//! Transport-keyed plugin registry

use portprint_common::{Plugin, Transport};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Plugins grouped by transport class, in registration order.
///
/// Populated once at startup and only read afterwards.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<Transport, Vec<Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin under its own transport class.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.entry(plugin.transport()).or_default().push(plugin);
    }

    /// Plugins for one transport class, empty when none are registered.
    pub fn plugins(&self, transport: Transport) -> &[Arc<dyn Plugin>] {
        self.plugins.get(&transport).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if any plugin of any class claims `port` as a priority port.
    pub fn is_priority_port(&self, port: u16) -> bool {
        Transport::ALL
            .iter()
            .any(|transport| self.plugins(*transport).iter().any(|p| p.is_priority_port(port)))
    }

    pub fn len(&self) -> usize {
        self.plugins.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

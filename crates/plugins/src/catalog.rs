//! Priority port catalog
//!
//! The default port set is every port that at least one registered plugin
//! expects to find its protocol on.

use crate::registry::PluginRegistry;

/// Ascending, duplicate-free list of priority ports across all transports.
pub fn priority_ports(registry: &PluginRegistry) -> Vec<u16> {
    (1..=u16::MAX).filter(|&port| registry.is_priority_port(port)).collect()
}

/// The priority ports joined with commas, e.g. `"21,22,23"`.
pub fn default_port_range(registry: &PluginRegistry) -> String {
    priority_ports(registry)
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

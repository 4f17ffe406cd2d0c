//! Plugin registry and priority port catalog
//!
//! - [`PluginRegistry`] groups protocol plugins by transport class
//! - [`SignaturePlugin`] recognises a protocol from response bytes
//! - [`default_port_range`] derives the default port set from the registry

mod builtin;
mod catalog;
mod registry;
mod signature;

pub use catalog::{default_port_range, priority_ports};
pub use registry::PluginRegistry;
pub use signature::SignaturePlugin;

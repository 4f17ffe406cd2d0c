//! Portprint Common - Shared types and traits
//!
//! Core types, capability traits and the error taxonomy used across the
//! portprint workspace.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PortprintError, PortprintResult};
pub use traits::{Plugin, ScanEngine};
pub use types::{ScanConfig, Service, Target, Transport};

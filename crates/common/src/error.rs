//! Error types for portprint
//!
//! Per-target failures (`InvalidTarget`, `ResolutionFailed`) are recovered by
//! the caller; every other variant aborts the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortprintError {
    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("failed to resolve host {host:?}: {reason}")]
    ResolutionFailed { host: String, reason: String },

    #[error("output file {0:?} already exists")]
    OutputFileExists(PathBuf),

    #[error("configuration conflict: {0}")]
    ConfigurationConflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("scan failed: {0}")]
    OrchestrationFailed(String),

    #[error("plugin {name} is misconfigured: {reason}")]
    Plugin { name: String, reason: String },
}

impl PortprintError {
    pub fn invalid_target(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn resolution_failed(host: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResolutionFailed {
            host: host.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures that only cost a single target.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. } | Self::ResolutionFailed { .. }
        )
    }
}

/// Result type alias for portprint operations
pub type PortprintResult<T> = Result<T, PortprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(PortprintError::invalid_target("x", "no port").is_recoverable());
        assert!(PortprintError::resolution_failed("x", "nxdomain").is_recoverable());
        assert!(!PortprintError::OutputFileExists(PathBuf::from("out.csv")).is_recoverable());
        assert!(!PortprintError::ConfigurationConflict("json and csv".into()).is_recoverable());
        assert!(!PortprintError::OrchestrationFailed("boom".into()).is_recoverable());
    }

    #[test]
    fn test_messages() {
        let e = PortprintError::invalid_target("badtarget", "missing port");
        assert_eq!(e.to_string(), "invalid target \"badtarget\": missing port");

        let e = PortprintError::OutputFileExists(PathBuf::from("results.json"));
        assert_eq!(e.to_string(), "output file \"results.json\" already exists");
    }
}

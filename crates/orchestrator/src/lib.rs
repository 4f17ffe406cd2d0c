//! Orchestrator - scan engine behind the `ScanEngine` contract

mod orchestrator;
mod probe;
mod summary;

pub use orchestrator::Orchestrator;

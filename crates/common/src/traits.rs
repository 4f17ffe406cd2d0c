//! Capability traits at the seams between portprint components

use crate::error::PortprintResult;
use crate::types::{ScanConfig, Service, Target, Transport};
use async_trait::async_trait;

/// A protocol plugin as seen by the registry and the scan engine.
pub trait Plugin: Send + Sync {
    /// Protocol identifier reported in `Service::protocol`.
    fn name(&self) -> &str;

    fn transport(&self) -> Transport;

    /// Whether this plugin expects to find its protocol on `port`.
    fn is_priority_port(&self, port: u16) -> bool;

    /// Whether a captured response belongs to this protocol.
    fn matches(&self, response: &[u8]) -> bool;

    /// Payload that elicits a response from a silent service.
    fn probe(&self) -> Option<&[u8]> {
        None
    }
}

/// Turns resolved targets into detected services.
#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Scan every target once. Per-target failures are absorbed; only a
    /// failure of the engine itself is returned.
    async fn scan_targets(&self, targets: Vec<Target>, config: &ScanConfig) -> PortprintResult<Vec<Service>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    struct EchoEngine;

    #[async_trait]
    impl ScanEngine for EchoEngine {
        async fn scan_targets(&self, targets: Vec<Target>, _config: &ScanConfig) -> PortprintResult<Vec<Service>> {
            Ok(targets.iter().map(|t| Service::new(t, "echo")).collect())
        }
    }

    struct Silent;

    impl Plugin for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn transport(&self) -> Transport {
            Transport::Tcp
        }

        fn is_priority_port(&self, port: u16) -> bool {
            port == 7
        }

        fn matches(&self, response: &[u8]) -> bool {
            response.is_empty()
        }
    }

    #[tokio::test]
    async fn test_engine_trait() {
        let addr: SocketAddr = "127.0.0.1:7".parse().unwrap();
        let services = EchoEngine
            .scan_targets(vec![Target::new(addr)], &ScanConfig::default())
            .await
            .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].protocol, "echo");
    }

    #[test]
    fn test_plugin_default_probe() {
        assert!(Silent.probe().is_none());
        assert!(Silent.is_priority_port(7));
        assert!(!Silent.is_priority_port(8));
    }
}

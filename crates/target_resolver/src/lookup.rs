//! Hostname lookup backends

use async_trait::async_trait;
use portprint_common::{PortprintError, PortprintResult};
use std::io;
use std::net::IpAddr;
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves a hostname to the addresses it currently maps to.
#[async_trait]
pub trait HostLookup: Send + Sync {
    /// Returns at least one address, or `ResolutionFailed`.
    async fn lookup(&self, host: &str) -> PortprintResult<Vec<IpAddr>>;
}

/// DNS lookup through the system resolver configuration.
pub struct DnsLookup {
    resolver: TokioAsyncResolver,
}

impl DnsLookup {
    /// Build a resolver from `/etc/resolv.conf` (or the platform equivalent).
    pub fn from_system_conf() -> PortprintResult<Self> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("failed to load resolver configuration: {e}")))?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl HostLookup for DnsLookup {
    async fn lookup(&self, host: &str) -> PortprintResult<Vec<IpAddr>> {
        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| PortprintError::resolution_failed(host, e))?;

        let addrs: Vec<IpAddr> = response.iter().collect();
        if addrs.is_empty() {
            return Err(PortprintError::resolution_failed(host, "no addresses returned"));
        }
        Ok(addrs)
    }
}

//! Target Resolver - endpoint parsing and DNS resolution
//!
//! Turns user-supplied `HOST:PORT` or `IP:PORT` strings into [`Target`]s.
//! Accepted forms:
//! - IPv4 literal: "10.0.0.1:22"
//! - bracketed IPv6 literal: "[2001:db8::1]:443"
//! - hostname: "example.com:80" (resolved, first address wins)
//!
//! A bad entry never fails the batch; it is dropped and, in verbose mode,
//! reported. Any other failure from the lookup backend aborts resolution.

mod lookup;
mod source;
#[cfg(test)]
mod test_support;

pub use lookup::{DnsLookup, HostLookup};
pub use source::{read_target_lines, TargetSource};

use portprint_common::{PortprintError, PortprintResult, Target};
use std::net::SocketAddr;
use tracing::{debug, warn};

pub struct TargetResolver<L> {
    lookup: L,
    verbose: bool,
}

impl<L: HostLookup> TargetResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            verbose: false,
        }
    }

    /// Surface dropped entries as warnings instead of debug logs.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve every raw target in order, skipping the ones that fail.
    /// Hostnames are looked up one at a time.
    pub async fn resolve<I, S>(&self, raw_targets: I) -> PortprintResult<Vec<Target>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut targets = Vec::new();
        for raw in raw_targets {
            match self.parse_target(raw.as_ref()).await {
                Ok(target) => targets.push(target),
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) if self.verbose => warn!("{}", e),
                Err(e) => debug!("{}", e),
            }
        }
        Ok(targets)
    }

    /// Parse a single entry. Literal addresses never touch the network.
    pub async fn parse_target(&self, raw: &str) -> PortprintResult<Target> {
        if let Ok(address) = raw.parse::<SocketAddr>() {
            return Ok(Target::new(address));
        }

        let (host, port) = split_host_port(raw).map_err(|reason| PortprintError::invalid_target(raw, reason))?;
        let port = parse_port(port).map_err(|reason| PortprintError::invalid_target(raw, reason))?;

        let addrs = self.lookup.lookup(host).await?;
        let ip = addrs
            .into_iter()
            .next()
            .ok_or_else(|| PortprintError::resolution_failed(host, "no addresses returned"))?;

        Ok(Target::new(SocketAddr::new(ip, port)).with_host(host))
    }
}

impl TargetResolver<DnsLookup> {
    /// Resolver backed by the system DNS configuration.
    pub fn system() -> PortprintResult<Self> {
        Ok(Self::new(DnsLookup::from_system_conf()?))
    }
}

/// Split `host:port` or `[host]:port`.
fn split_host_port(input: &str) -> Result<(&str, &str), &'static str> {
    let (host, port) = if let Some(rest) = input.strip_prefix('[') {
        let end = rest.find(']').ok_or("missing ']' in address")?;
        let port = rest[end + 1..].strip_prefix(':').ok_or("missing port in address")?;
        (&rest[..end], port)
    } else {
        let idx = input.rfind(':').ok_or("missing port in address")?;
        let host = &input[..idx];
        if host.contains(':') {
            return Err("too many colons in address");
        }
        (host, &input[idx + 1..])
    };

    if host.is_empty() {
        return Err("missing host in address");
    }
    Ok((host, port))
}

fn parse_port(port: &str) -> Result<u16, &'static str> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err("port is not a number");
    }
    port.parse::<u16>().map_err(|_| "port out of range")
}

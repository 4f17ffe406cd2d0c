//! Core data types shared by the resolver, the scan engine and the reporter.

use serde::{Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Transport class a plugin speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Transport {
    Udp,
    Tcp,
    TcpTls,
}

impl Transport {
    /// Fixed iteration order used wherever every class is consulted.
    pub const ALL: [Transport; 3] = [Transport::Udp, Transport::Tcp, Transport::TcpTls];

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "udp",
            Transport::Tcp => "tcp",
            Transport::TcpTls => "tcp+tls",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved scan endpoint.
///
/// `address` always holds a concrete IP and port. `host` is only set when the
/// address came out of a DNS lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub address: SocketAddr,
    pub host: Option<String>,
}

impl Target {
    #[inline]
    #[must_use]
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            host: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.address.ip()
    }

    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.address.port()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{} ({})", host, self.port(), self.ip()),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A detected service, as handed back by the scan engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub host: String,
    pub ip: IpAddr,
    pub port: u16,
    pub protocol: String,
    pub tls: bool,
    #[serde(serialize_with = "serialize_raw")]
    pub raw: Vec<u8>,
}

impl Service {
    /// Build a service record for `target`, carrying over its hostname.
    #[must_use]
    pub fn new(target: &Target, protocol: impl Into<String>) -> Self {
        Self {
            host: target.host.clone().unwrap_or_default(),
            ip: target.ip(),
            port: target.port(),
            protocol: protocol.into(),
            tls: false,
            raw: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_raw(mut self, raw: Vec<u8>) -> Self {
        self.raw = raw;
        self
    }

    /// Captured payload as text; invalid UTF-8 is replaced.
    #[must_use]
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }
}

fn serialize_raw<S: Serializer>(raw: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(raw))
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.is_empty() {
            write!(f, "{}://{}", self.protocol, SocketAddr::new(self.ip, self.port))?;
        } else {
            write!(f, "{}://{}:{} ({})", self.protocol, self.host, self.port, self.ip)?;
        }
        if self.tls {
            f.write_str(" [tls]")?;
        }
        Ok(())
    }
}

/// Scan behaviour, built once from the command line and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub default_timeout: Duration,
    pub fast_mode: bool,
    pub udp: bool,
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(2000),
            fast_mode: false,
            udp: false,
            verbose: false,
        }
    }
}

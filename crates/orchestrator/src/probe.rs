//! Per-target protocol identification

use portprint_common::{Plugin, ScanConfig, Service, Target, Transport};
use portprint_plugins::PluginRegistry;
use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

const MAX_RESPONSE: usize = 4096;

/// Runs candidate plugins against one target at a time.
pub(crate) struct Prober {
    registry: Arc<PluginRegistry>,
    config: ScanConfig,
}

impl Prober {
    pub(crate) fn new(registry: Arc<PluginRegistry>, config: ScanConfig) -> Self {
        Self { registry, config }
    }

    /// Identify the service behind `target`. Connection failures only cost
    /// this target.
    #[instrument(skip_all, fields(target = %target))]
    pub(crate) async fn identify(&self, target: &Target) -> Option<Service> {
        let result = if self.config.udp {
            self.identify_udp(target).await
        } else {
            self.identify_tcp(target).await
        };

        match result {
            Ok(service) => service,
            Err(e) if self.config.verbose => {
                warn!("{}: {}", target, e);
                None
            }
            Err(e) => {
                debug!("{}: {}", target, e);
                None
            }
        }
    }

    /// Plugins claiming the port come first. Fast mode stops there.
    fn candidates(&self, transport: Transport, port: u16) -> Vec<Arc<dyn Plugin>> {
        let (mut ordered, rest): (Vec<_>, Vec<_>) = self
            .registry
            .plugins(transport)
            .iter()
            .cloned()
            .partition(|p| p.is_priority_port(port));
        if !self.config.fast_mode {
            ordered.extend(rest);
        }
        ordered
    }

    async fn identify_tcp(&self, target: &Target) -> io::Result<Option<Service>> {
        let candidates = self.candidates(Transport::Tcp, target.port());
        if candidates.is_empty() {
            return Ok(None);
        }

        // Passive grab first: many services greet before the client speaks.
        let mut stream = self.connect(target.address).await?;
        let banner = read_response(&mut stream, self.config.default_timeout / 2).await?;
        drop(stream);

        if !banner.is_empty() {
            let found = candidates.iter().find(|p| p.matches(&banner));
            return Ok(found.map(|p| Service::new(target, p.name()).with_raw(banner)));
        }

        for plugin in &candidates {
            let Some(probe) = plugin.probe() else { continue };
            let mut stream = self.connect(target.address).await?;
            timeout(self.config.default_timeout, stream.write_all(probe))
                .await
                .map_err(|_| timed_out("write"))??;
            let response = read_response(&mut stream, self.config.default_timeout).await?;
            if plugin.matches(&response) {
                return Ok(Some(Service::new(target, plugin.name()).with_raw(response)));
            }
            debug!("{} did not answer the {} probe", target, plugin.name());
        }
        Ok(None)
    }

    async fn identify_udp(&self, target: &Target) -> io::Result<Option<Service>> {
        let local = if target.address.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        for plugin in self.candidates(Transport::Udp, target.port()) {
            let Some(probe) = plugin.probe() else { continue };
            let socket = UdpSocket::bind(local).await?;
            socket.connect(target.address).await?;
            socket.send(probe).await?;

            let mut buf = vec![0u8; MAX_RESPONSE];
            match timeout(self.config.default_timeout, socket.recv(&mut buf)).await {
                Ok(Ok(n)) => {
                    buf.truncate(n);
                    if plugin.matches(&buf) {
                        return Ok(Some(Service::new(target, plugin.name()).with_raw(buf)));
                    }
                }
                // ICMP port unreachable surfaces as a refused receive.
                Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => return Ok(None),
                Ok(Err(e)) => return Err(e),
                Err(_) => debug!("{} did not answer the {} probe", target, plugin.name()),
            }
        }
        Ok(None)
    }

    async fn connect(&self, addr: SocketAddr) -> io::Result<TcpStream> {
        timeout(self.config.default_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| timed_out("connect"))?
    }
}

/// Read whatever arrives within `wait`. Silence is an empty response.
async fn read_response(stream: &mut TcpStream, wait: Duration) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; MAX_RESPONSE];
    match timeout(wait, stream.read(&mut buf)).await {
        Ok(Ok(n)) => {
            buf.truncate(n);
            Ok(buf)
        }
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionReset => Ok(Vec::new()),
        Ok(Err(e)) => Err(e),
        Err(_) => Ok(Vec::new()),
    }
}

fn timed_out(stage: &str) -> io::Error {
    io::Error::new(ErrorKind::TimedOut, format!("{stage} timed out"))
}

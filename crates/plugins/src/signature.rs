//! Plugins that recognise a protocol by a byte pattern in its response

use portprint_common::{Plugin, PortprintError, PortprintResult, Transport};
use regex::bytes::Regex;

pub struct SignaturePlugin {
    name: &'static str,
    transport: Transport,
    ports: &'static [u16],
    signature: Regex,
    probe: Option<&'static [u8]>,
}

impl SignaturePlugin {
    /// `pattern` is matched against raw response bytes.
    pub fn new(name: &'static str, transport: Transport, ports: &'static [u16], pattern: &str) -> PortprintResult<Self> {
        let signature = Regex::new(pattern).map_err(|e| PortprintError::Plugin {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            transport,
            ports,
            signature,
            probe: None,
        })
    }

    pub fn with_probe(mut self, probe: &'static [u8]) -> Self {
        self.probe = Some(probe);
        self
    }
}

impl Plugin for SignaturePlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn transport(&self) -> Transport {
        self.transport
    }

    fn is_priority_port(&self, port: u16) -> bool {
        self.ports.contains(&port)
    }

    fn matches(&self, response: &[u8]) -> bool {
        self.signature.is_match(response)
    }

    fn probe(&self) -> Option<&[u8]> {
        self.probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_match() {
        let ssh = SignaturePlugin::new("ssh", Transport::Tcp, &[22], r"^SSH-\d+\.\d+-").unwrap();
        assert!(ssh.matches(b"SSH-2.0-OpenSSH_8.2p1 Ubuntu-4ubuntu0.5\r\n"));
        assert!(!ssh.matches(b"HTTP/1.1 200 OK\r\n"));
        assert!(ssh.is_priority_port(22));
        assert!(!ssh.is_priority_port(2222));
        assert!(ssh.probe().is_none());
    }

    #[test]
    fn test_binary_signature() {
        let telnet = SignaturePlugin::new("telnet", Transport::Tcp, &[23], r"(?-u)^\xff[\xfb-\xfe]").unwrap();
        assert!(telnet.matches(&[0xff, 0xfd, 0x18]));
        assert!(!telnet.matches(b"login: "));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = SignaturePlugin::new("broken", Transport::Tcp, &[1], "(").err().unwrap();
        assert!(matches!(err, PortprintError::Plugin { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_probe_is_exposed() {
        let http = SignaturePlugin::new("http", Transport::Tcp, &[80], r"^HTTP/")
            .unwrap()
            .with_probe(b"GET / HTTP/1.0\r\n\r\n");
        assert_eq!(http.probe(), Some(&b"GET / HTTP/1.0\r\n\r\n"[..]));
    }
}

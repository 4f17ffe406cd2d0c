//! Built-in protocol plugins
//!
//! Port assignments follow IANA and common deployment practice. Signatures
//! are matched against the first bytes a service sends back.

use crate::registry::PluginRegistry;
use crate::signature::SignaturePlugin;
use portprint_common::{PortprintResult, Transport};
use std::sync::Arc;
use tracing::debug;

const HTTP_PROBE: &[u8] = b"GET / HTTP/1.0\r\n\r\n";
const REDIS_PROBE: &[u8] = b"PING\r\n";

// Anonymous simple bind, message id 1.
const LDAP_PROBE: &[u8] = &[
    0x30, 0x0c, 0x02, 0x01, 0x01, 0x60, 0x07, 0x02, 0x01, 0x03, 0x04, 0x00, 0x80, 0x00,
];

// version.bind CH TXT, id 0x1234, recursion desired.
const DNS_PROBE: &[u8] = &[
    0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, b'v', b'e', b'r', b's', b'i',
    b'o', b'n', 0x04, b'b', b'i', b'n', b'd', 0x00, 0x00, 0x10, 0x00, 0x03,
];

// NTPv4 client request.
const NTP_PROBE: &[u8; 48] = &{
    let mut packet = [0u8; 48];
    packet[0] = 0xe3;
    packet
};

// SNMPv1 get-request for sysDescr.0, community "public".
const SNMP_PROBE: &[u8] = &[
    0x30, 0x26, 0x02, 0x01, 0x00, 0x04, 0x06, b'p', b'u', b'b', b'l', b'i', b'c', 0xa0, 0x19, 0x02, 0x01, 0x01,
    0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x0e, 0x30, 0x0c, 0x06, 0x08, 0x2b, 0x06, 0x01, 0x02, 0x01, 0x01,
    0x01, 0x00, 0x05, 0x00,
];

const HTTP_SIGNATURE: &str = r"^HTTP/\d(\.\d)? \d{3}";
const SMTP_SIGNATURE: &str = r"(?i)^220[ -].*(smtp|mail)";
const POP3_SIGNATURE: &str = r"^\+OK";
const IMAP_SIGNATURE: &str = r"^\* (OK|PREAUTH)";
const LDAP_SIGNATURE: &str = r"(?s-u)^\x30.{1,4}\x02\x01\x01\x61";

impl PluginRegistry {
    /// Registry holding every built-in plugin.
    pub fn builtin() -> PortprintResult<Self> {
        let plugins = vec![
            // UDP
            SignaturePlugin::new("dns", Transport::Udp, &[53], r"(?s-u)^\x12\x34[\x80-\xff]")?.with_probe(DNS_PROBE),
            SignaturePlugin::new("ntp", Transport::Udp, &[123], r"(?s-u)^[\x1c\x24\x5c\x64\x9c\xa4\xdc\xe4].{47}")?
                .with_probe(NTP_PROBE),
            SignaturePlugin::new("snmp", Transport::Udp, &[161], r"(?s-u)^\x30.{1,3}\x02\x01[\x00\x01\x03]\x04")?
                .with_probe(SNMP_PROBE),
            // TCP
            SignaturePlugin::new("ssh", Transport::Tcp, &[22, 2222], r"^SSH-\d+\.\d+-")?,
            SignaturePlugin::new("ftp", Transport::Tcp, &[21], r"(?i)^220[ -].*ftp")?,
            SignaturePlugin::new("smtp", Transport::Tcp, &[25, 587, 2525], SMTP_SIGNATURE)?,
            SignaturePlugin::new("pop3", Transport::Tcp, &[110], POP3_SIGNATURE)?,
            SignaturePlugin::new("imap", Transport::Tcp, &[143], IMAP_SIGNATURE)?,
            SignaturePlugin::new("telnet", Transport::Tcp, &[23], r"(?-u)^\xff[\xfb-\xfe]")?,
            SignaturePlugin::new("vnc", Transport::Tcp, &[5900, 5901, 5902], r"^RFB \d{3}\.\d{3}\n")?,
            SignaturePlugin::new("rsync", Transport::Tcp, &[873], r"^@RSYNCD: \d+")?,
            SignaturePlugin::new("mysql", Transport::Tcp, &[3306], r"(?s-u)^.{3}\x00(\x0a[0-9]|\xff)")?,
            SignaturePlugin::new("redis", Transport::Tcp, &[6379], r"^(\+PONG|-NOAUTH|-ERR)")?.with_probe(REDIS_PROBE),
            SignaturePlugin::new("ldap", Transport::Tcp, &[389], LDAP_SIGNATURE)?.with_probe(LDAP_PROBE),
            SignaturePlugin::new("http", Transport::Tcp, &[80, 3000, 5000, 8000, 8080, 8888, 9000], HTTP_SIGNATURE)?
                .with_probe(HTTP_PROBE),
            // TCP+TLS
            SignaturePlugin::new("https", Transport::TcpTls, &[443, 8443], HTTP_SIGNATURE)?.with_probe(HTTP_PROBE),
            SignaturePlugin::new("smtps", Transport::TcpTls, &[465], SMTP_SIGNATURE)?,
            SignaturePlugin::new("ldaps", Transport::TcpTls, &[636], LDAP_SIGNATURE)?.with_probe(LDAP_PROBE),
            SignaturePlugin::new("imaps", Transport::TcpTls, &[993], IMAP_SIGNATURE)?,
            SignaturePlugin::new("pop3s", Transport::TcpTls, &[995], POP3_SIGNATURE)?,
        ];

        let mut registry = PluginRegistry::new();
        for plugin in plugins {
            registry.register(Arc::new(plugin));
        }
        debug!("Registered {} built-in plugins", registry.len());
        Ok(registry)
    }
}

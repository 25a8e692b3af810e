//! Parsing of the textual representation of an event source
//!
//! Accepted forms: `[2001:db8::1]:514` or `2001:db8::1` (IPv6), `-` or an empty line (no address),
//! `unix:/dev/log` (unix domain socket), `192.0.2.1:514` or `192.0.2.1` (IPv4)

use std::fmt;
use std::net::{IpAddr, SocketAddr, SocketAddrV6};

use netmask6_filter_common::SourceAddress;

const UNIX_PREFIX: &str = "unix:";

#[derive(Debug, PartialEq, Eq)]
pub enum SourceParseError {
    InvalidSource(String),
}

impl fmt::Display for SourceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceParseError::InvalidSource(text) => write!(f, "Invalid source address: {}", text),
        }
    }
}

impl std::error::Error for SourceParseError {}

/// Parses the source of an event
///
/// # Arguments
/// * `text` - the source, e.g. "[::1]:514", "-", "unix:/dev/log"
///
/// # Returns
/// The source address or an error if the text is not a known form
pub fn parse_source(text: &str) -> Result<SourceAddress, SourceParseError> {
    let text = text.trim();
    if text.is_empty() || text == "-" {
        return Ok(SourceAddress::from(None::<SocketAddr>));
    }
    if text.starts_with(UNIX_PREFIX) {
        return Ok(SourceAddress::Local);
    }
    if let Ok(addr) = text.parse::<SocketAddr>() {
        return Ok(SourceAddress::from(addr));
    }
    match text.parse::<IpAddr>() {
        Ok(IpAddr::V6(ip)) => Ok(SourceAddress::from(SocketAddrV6::new(ip, 0, 0, 0))),
        Ok(IpAddr::V4(_)) => Ok(SourceAddress::Other),
        Err(_) => Err(SourceParseError::InvalidSource(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use netmask6_filter_common::SourceAddress;
    use std::net::{Ipv6Addr, SocketAddrV6};

    #[test]
    fn test_parse_source_ipv6_socket_addr() {
        let expected = SocketAddrV6::new("2001:db8::1".parse::<Ipv6Addr>().unwrap(), 514, 0, 0);
        assert_eq!(
            SourceAddress::Inet6(expected),
            super::parse_source("[2001:db8::1]:514").unwrap()
        );
    }

    #[test]
    fn test_parse_source_bare_ipv6() {
        assert_eq!(
            SourceAddress::Inet6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 0, 0, 0)),
            super::parse_source(" ::1 ").unwrap()
        );
    }

    #[test]
    fn test_parse_source_local() {
        assert_eq!(SourceAddress::Local, super::parse_source("-").unwrap());
        assert_eq!(SourceAddress::Local, super::parse_source("").unwrap());
        assert_eq!(SourceAddress::Local, super::parse_source("unix:/dev/log").unwrap());
    }

    #[test]
    fn test_parse_source_ipv4_is_other() {
        assert_eq!(SourceAddress::Other, super::parse_source("192.0.2.1:514").unwrap());
        assert_eq!(SourceAddress::Other, super::parse_source("192.0.2.1").unwrap());
    }

    #[test]
    fn test_parse_source_invalid() {
        assert_eq!(
            "Invalid source address: invalid".to_string(),
            super::parse_source("invalid").unwrap_err().to_string()
        );
    }
}

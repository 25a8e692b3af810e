//! Source address of the event (message) a filter is evaluated against

use core::net::{SocketAddr, SocketAddrV6};

/// Address family the event was received from. These are the only three cases a filter has to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceAddress {
    /// The event carries an IPv6 socket address
    Inet6(SocketAddrV6),
    /// The event carries no address at all or a non-IP local one (unix domain socket)
    Local,
    /// Any other address family, e.g. IPv4
    Other,
}

impl From<SocketAddrV6> for SourceAddress {
    fn from(addr: SocketAddrV6) -> Self {
        SourceAddress::Inet6(addr)
    }
}

impl From<SocketAddr> for SourceAddress {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V6(addr) => SourceAddress::Inet6(addr),
            SocketAddr::V4(_) => SourceAddress::Other,
        }
    }
}

/// An event without a socket address is treated as locally originated
impl From<Option<SocketAddr>> for SourceAddress {
    fn from(addr: Option<SocketAddr>) -> Self {
        match addr {
            Some(addr) => SourceAddress::from(addr),
            None => SourceAddress::Local,
        }
    }
}

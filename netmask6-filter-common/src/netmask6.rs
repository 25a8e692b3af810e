//! Module for determining if an IPv6 address falls within a configured network (CIDR).
//!
//! The network address of an address is computed on its two 64 bit half words, which are always
//! loaded and stored in network byte order (big endian). The result is therefore the same on
//! little and big endian hosts.

use core::fmt;
use core::net::Ipv6Addr;
use core::str::FromStr;

use crate::filter::FilterExpr;
use crate::source::SourceAddress;

pub const MAX_BIT_MASK_SIZE: u8 = 128; // IPv6 128 Bit
const WORD_BIT_SIZE: u8 = 64;
const INET6_ADDRSTRLEN: usize = 46;
/// Literals of this length or longer are not split into address and prefix
const MAX_CIDR_LEN: usize = INET6_ADDRSTRLEN + 5;

/// Number of leading network bits of an IPv6 address, always in 1..=128
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixLength(u8);

impl PrefixLength {
    /// Prefix of a single host (exact match)
    pub const HOST: PrefixLength = PrefixLength(MAX_BIT_MASK_SIZE);

    /// Returns the prefix length or None if `bits` is 0 or larger than 128
    pub const fn new(bits: u8) -> Option<PrefixLength> {
        if bits > 0 && bits <= MAX_BIT_MASK_SIZE {
            Some(PrefixLength(bits))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PrefixLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mask with the `bits` most significant bits of a word set. `bits` must be within 0..=64
fn calculate_mask_by_prefix(bits: u8) -> u64 {
    u64::MAX
        .checked_shl(u32::from(WORD_BIT_SIZE - bits))
        .unwrap_or(0)
}

/// Computes the network address of an IPv6 address, i.e. clears all bits after the prefix
///
/// # Arguments
/// * `octets` - the address in network byte order
/// * `prefix` - number of leading bits to keep
///
/// # Returns
/// The network address in network byte order
///
/// # Examples
/// ```
/// use netmask6_filter_common::{network_address, PrefixLength};
/// let addr: std::net::Ipv6Addr = "2001:db8:1234::5".parse().unwrap();
/// let network = network_address(&addr.octets(), PrefixLength::new(32).unwrap());
/// assert_eq!("2001:db8::".parse::<std::net::Ipv6Addr>().unwrap().octets(), network);
/// ```
pub fn network_address(octets: &[u8; 16], prefix: PrefixLength) -> [u8; 16] {
    let mut head = [0u8; 8];
    let mut tail = [0u8; 8];
    head.copy_from_slice(&octets[..8]);
    tail.copy_from_slice(&octets[8..]);
    let head = u64::from_be_bytes(head);
    let tail = u64::from_be_bytes(tail);

    let (head, tail) = if prefix.0 <= WORD_BIT_SIZE {
        (head & calculate_mask_by_prefix(prefix.0), 0)
    } else {
        (head, tail & calculate_mask_by_prefix(prefix.0 - WORD_BIT_SIZE))
    };

    let mut network = [0u8; 16];
    network[..8].copy_from_slice(&head.to_be_bytes());
    network[8..].copy_from_slice(&tail.to_be_bytes());
    network
}

/// Reasons a CIDR literal is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidrError {
    EmptyAddress,
    InvalidAddress,
    InvalidPrefix,
}

impl fmt::Display for CidrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CidrError::EmptyAddress => "Empty address",
            CidrError::InvalidAddress => "Invalid IPv6 address",
            CidrError::InvalidPrefix => "Invalid prefix length, expected 1-128",
        };
        f.write_str(msg)
    }
}

/// An IPv6 network: a network address (host bits zero) and its prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Network {
    address: Ipv6Addr,
    prefix: PrefixLength,
}

impl Ipv6Network {
    /// Creates the network `address` belongs to. Host bits of `address` are cleared
    pub fn new(address: Ipv6Addr, prefix: PrefixLength) -> Ipv6Network {
        Ipv6Network {
            address: Ipv6Addr::from(network_address(&address.octets(), prefix)),
            prefix,
        }
    }

    pub fn address(&self) -> Ipv6Addr {
        self.address
    }

    pub fn prefix(&self) -> PrefixLength {
        self.prefix
    }

    /// Returns true if `ip` shares the first `prefix` bits with the network
    pub fn contains(&self, ip: &Ipv6Addr) -> bool {
        network_address(&ip.octets(), self.prefix) == self.address.octets()
    }
}

impl fmt::Display for Ipv6Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

/// Reads the prefix like a C `atol`: leading whitespace and an optional sign are skipped, digits are
/// read up to the first non-digit and the rest of the text is ignored
fn parse_prefix(prefix: &str) -> Result<PrefixLength, CidrError> {
    let prefix = prefix.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match prefix.as_bytes().first() {
        Some(b'-') => (true, &prefix[1..]),
        Some(b'+') => (false, &prefix[1..]),
        _ => (false, prefix),
    };
    let bits = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .try_fold(0u32, |acc, digit| {
            acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
        });
    match bits {
        Some(bits) if !negative => u8::try_from(bits)
            .ok()
            .and_then(PrefixLength::new)
            .ok_or(CidrError::InvalidPrefix),
        _ => Err(CidrError::InvalidPrefix),
    }
}

/// Parses a CIDR, either a bare address (e.g. "::1", prefix 128) or "address/prefix" (e.g. "2001:db8::/32")
///
/// # Arguments
/// * `cidr` - the CIDR literal
///
/// # Returns
/// The network with host bits cleared or the reason why the literal is not valid
pub fn parse_cidr(cidr: &str) -> Result<Ipv6Network, CidrError> {
    let (address, prefix) = match cidr.split_once('/') {
        Some((address, prefix)) if cidr.len() < MAX_CIDR_LEN => (address, parse_prefix(prefix)?),
        _ => (cidr, PrefixLength::HOST),
    };
    if address.is_empty() {
        return Err(CidrError::EmptyAddress);
    }
    let address = Ipv6Addr::from_str(address).map_err(|_| CidrError::InvalidAddress)?;
    Ok(Ipv6Network::new(address, prefix))
}

/// Filter expression matching events whose IPv6 source address lies within a network
///
/// A literal that cannot be parsed does not fail the construction. The filter is marked as
/// invalid instead and never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterNetmask6 {
    network: Ipv6Network,
    is_valid: bool,
}

impl FilterNetmask6 {
    pub fn new(cidr: &str) -> FilterNetmask6 {
        match parse_cidr(cidr) {
            Ok(network) => FilterNetmask6::from(network),
            Err(_) => FilterNetmask6::invalid(),
        }
    }

    /// Filter for a literal that could not be parsed: it holds `::1/128` and never matches
    pub fn invalid() -> FilterNetmask6 {
        FilterNetmask6 {
            network: Ipv6Network {
                address: Ipv6Addr::LOCALHOST,
                prefix: PrefixLength::HOST,
            },
            is_valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn network(&self) -> &Ipv6Network {
        &self.network
    }
}

impl From<Ipv6Network> for FilterNetmask6 {
    fn from(network: Ipv6Network) -> Self {
        FilterNetmask6 {
            network,
            is_valid: true,
        }
    }
}

impl FilterExpr for FilterNetmask6 {
    fn matches(&self, source: &SourceAddress) -> bool {
        if !self.is_valid {
            return false;
        }
        let candidate = match source {
            SourceAddress::Inet6(addr) => *addr.ip(),
            SourceAddress::Local => Ipv6Addr::LOCALHOST,
            SourceAddress::Other => return false,
        };
        self.network.contains(&candidate)
    }
}

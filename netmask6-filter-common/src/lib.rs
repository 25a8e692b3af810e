#![cfg_attr(not(test), no_std)]
//! Shared, allocation free building blocks of the IPv6 netmask filter.
//! We work here with `core` types only so the masking and the comparison can also be used in
//! constrained environments (e.g. an eBPF module) that do not have the standard library.

pub mod filter;
pub mod netmask6;
pub mod source;

pub use filter::{FilterExpr, FilterNode};
pub use netmask6::{network_address, parse_cidr, CidrError, FilterNetmask6, Ipv6Network, PrefixLength};
pub use source::SourceAddress;

//! Hostname resolution for netmask specs.
//!
//! A netmask spec's address part may be a hostname instead of an address
//! literal. Resolution is a capability the crate consumes, not something
//! it implements: the [`Lookup`] trait describes the contract and
//! [`SystemLookup`] fulfills it with the operating system's resolver.
//! Nothing about caching, retries, or timeouts is part of the contract;
//! a lookup is a single synchronous call, and callers who need a timeout
//! have to wrap it themselves.
//!
//! This module is only available with the `resolv` feature.

use crate::addr::Addr;
use crate::netmask::{split_spec, Netmask, ParseNetmaskError};
use crate::parser;
use core::net::IpAddr;
use std::io;
use std::net::ToSocketAddrs;
use std::vec::Vec;

//------------ Lookup --------------------------------------------------------

/// A hostname resolver.
///
/// Implementations return the resolved addresses in preference order;
/// netmask construction takes the first one.
pub trait Lookup {
    /// Resolves `host` into zero or more addresses.
    fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, io::Error>;
}

//------------ SystemLookup --------------------------------------------------

/// The operating system's resolver.
///
/// Resolution happens through the std library's blocking name lookup,
/// so this honors whatever the system is configured to do – hosts
/// files, DNS, or anything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLookup;

impl Lookup for SystemLookup {
    fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, io::Error> {
        // The std lookup interface resolves socket addresses, so tack on
        // a port and drop it again.
        Ok((host, 0u16)
            .to_socket_addrs()?
            .map(|addr| addr.ip())
            .collect())
    }
}

//------------ Resolving Construction ----------------------------------------

/// # Hostname Resolution
///
impl Netmask {
    /// Creates a netmask from a spec, resolving hostnames through the
    /// system resolver.
    ///
    /// The address part of the spec is first tried as an address
    /// literal; only if that fails is it handed to the resolver. The
    /// call blocks while resolution is in progress.
    ///
    /// ```no_run
    /// use netmask::Netmask;
    ///
    /// let block = Netmask::resolve("localhost/8").unwrap();
    /// assert!(block.matches_str("127.0.0.1"));
    /// ```
    pub fn resolve(spec: &str) -> Result<Self, ParseNetmaskError> {
        Self::resolve_with(spec, &SystemLookup)
    }

    /// Creates a netmask from a spec, resolving hostnames through the
    /// given resolver.
    pub fn resolve_with<L: Lookup>(
        spec: &str,
        lookup: &L,
    ) -> Result<Self, ParseNetmaskError> {
        let (host, prefix) = split_spec(spec)?;
        let addr = match parser::parse_addr(host) {
            Ok(addr) => addr,
            Err(_) => {
                tracing::debug!(host, "not an address literal, resolving");
                let addrs = lookup.lookup_host(host).map_err(|err| {
                    tracing::debug!(host, error = %err, "resolution failed");
                    ParseNetmaskError::InvalidAddress
                })?;
                match addrs.first() {
                    Some(addr) => Addr::from(*addr),
                    None => {
                        tracing::debug!(host, "resolved to no addresses");
                        return Err(ParseNetmaskError::InvalidAddress);
                    }
                }
            }
        };
        Self::from_parts(addr, prefix)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::net::Ipv4Addr;

    /// A resolver with a fixed table, recording whether it was asked.
    struct TableLookup {
        table: Vec<(&'static str, IpAddr)>,
        queried: core::cell::Cell<bool>,
    }

    impl TableLookup {
        fn new(table: Vec<(&'static str, IpAddr)>) -> Self {
            TableLookup {
                table,
                queried: core::cell::Cell::new(false),
            }
        }
    }

    impl Lookup for TableLookup {
        fn lookup_host(
            &self,
            host: &str,
        ) -> Result<Vec<IpAddr>, io::Error> {
            self.queried.set(true);
            Ok(self
                .table
                .iter()
                .filter(|(name, _)| *name == host)
                .map(|(_, addr)| *addr)
                .collect())
        }
    }

    #[test]
    fn hostname_spec() {
        let lookup = TableLookup::new(vec![
            ("gateway.example", IpAddr::V4(Ipv4Addr::new(192, 168, 0, 77))),
            ("gateway.example", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
        ]);
        let block =
            Netmask::resolve_with("gateway.example/24", &lookup).unwrap();
        // The first resolved address wins and its host bits get masked.
        assert_eq!(format!("{}", block), "192.168.0.0/24");
        assert!(lookup.queried.get());
    }

    #[test]
    fn literal_spec_skips_resolution() {
        let lookup = TableLookup::new(vec![]);
        let block =
            Netmask::resolve_with("192.168.0.0/24", &lookup).unwrap();
        assert!(block.matches_str("192.168.0.1"));
        assert!(!lookup.queried.get());
    }

    #[test]
    fn unresolvable_host() {
        let lookup = TableLookup::new(vec![]);
        assert_eq!(
            Netmask::resolve_with("nowhere.example/24", &lookup),
            Err(ParseNetmaskError::InvalidAddress)
        );
    }

    #[test]
    fn bad_spec_fails_before_resolution() {
        let lookup = TableLookup::new(vec![]);
        assert_eq!(
            Netmask::resolve_with("gateway.example", &lookup),
            Err(ParseNetmaskError::InvalidFormat)
        );
        assert!(!lookup.queried.get());
    }

    #[test]
    fn resolved_prefix_is_checked() {
        let lookup = TableLookup::new(vec![(
            "gateway.example",
            IpAddr::V4(Ipv4Addr::new(192, 168, 0, 77)),
        )]);
        assert_eq!(
            Netmask::resolve_with("gateway.example/33", &lookup),
            Err(ParseNetmaskError::InvalidPrefixLength)
        );
    }
}

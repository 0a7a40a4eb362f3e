//! Network blocks and membership testing.
//!
//! This is the heart of the crate. A [`Netmask`] value describes a CIDR
//! network block: a network address plus a prefix length giving the
//! number of leading bits that make up the network part. Once built it
//! never changes, so it can be shared and queried freely from any number
//! of threads.
//!
//! Construction is strict: any problem with the spec – a malformed
//! string, a prefix exceeding the family width, an unparseable address –
//! fails outright and no netmask exists. Membership testing is lenient:
//! a candidate of the other family, or candidate text that is not a
//! valid address at all, simply is not a member and yields `false`. The
//! single exception is a variable length sequence of a size that fits no
//! address family, which indicates a broken caller rather than a
//! legitimate query and therefore fails with [`SizeError`].

use crate::addr::{Addr, Family, SizeError};
use crate::parser::{self, AddrParseError};
use core::fmt;
use core::str::FromStr;

//------------ Netmask -------------------------------------------------------

/// An immutable CIDR network block.
///
/// The network address is masked once, at construction; all host bits
/// are already zero in the stored value. The address family follows
/// from the stored [`Addr`] variant.
///
/// ```
/// use netmask::Netmask;
///
/// let block: Netmask = "3fff::/20".parse().unwrap();
/// assert!(block.is_ipv6());
/// assert!(block.matches_str("3fff::1"));
/// assert!(!block.matches_str("4000::1"));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Netmask {
    /// The network address with all host bits cleared.
    network: Addr,

    /// The number of leading bits making up the network part.
    prefix: u8,
}

/// # Creation
///
impl Netmask {
    /// Creates a netmask from a typed address and a prefix length.
    ///
    /// Any host bits set in `addr` are cleared. Fails if `prefix`
    /// exceeds the width of the address family.
    pub fn new<A: Into<Addr>>(
        addr: A,
        prefix: u8,
    ) -> Result<Self, PrefixError> {
        let addr = addr.into();
        if prefix > addr.width() {
            return Err(PrefixError(()));
        }
        Ok(Netmask {
            network: addr.masked(prefix),
            prefix,
        })
    }

    /// Creates a netmask from an already resolved address and a prefix
    /// taken from a spec string.
    pub(crate) fn from_parts(
        addr: Addr,
        prefix: u32,
    ) -> Result<Self, ParseNetmaskError> {
        if prefix > u32::from(addr.width()) {
            return Err(ParseNetmaskError::InvalidPrefixLength);
        }
        Ok(Netmask {
            network: addr.masked(prefix as u8),
            prefix: prefix as u8,
        })
    }
}

/// # Access
///
impl Netmask {
    /// Returns the masked network address.
    pub fn addr(self) -> Addr {
        self.network
    }

    /// Returns the prefix length.
    pub fn prefix(self) -> u8 {
        self.prefix
    }

    /// Returns the address family of the block.
    pub fn family(self) -> Family {
        self.network.family()
    }

    /// Returns whether this is an IPv4 block.
    pub fn is_ipv4(self) -> bool {
        self.network.is_ipv4()
    }

    /// Returns whether this is an IPv6 block.
    pub fn is_ipv6(self) -> bool {
        self.network.is_ipv6()
    }
}

/// # Membership Testing
///
impl Netmask {
    /// Returns whether `addr` falls inside the block.
    ///
    /// Accepts anything that converts into an [`Addr`]: raw integers,
    /// fixed size sequences, the `core::net` address types, and socket
    /// addresses, whose port is ignored. A candidate of the other
    /// family is simply not a member.
    pub fn matches<A: Into<Addr>>(self, addr: A) -> bool {
        self.matches_addr(addr.into())
    }

    /// Returns whether the address given as text falls inside the block.
    ///
    /// Text that does not parse as an address literal of either family
    /// is not a member; no error is reported for it.
    pub fn matches_str(self, text: &str) -> bool {
        match parser::parse_addr(text) {
            Ok(addr) => self.matches_addr(addr),
            Err(_) => false,
        }
    }

    /// Returns whether the address given as an octet sequence falls
    /// inside the block.
    ///
    /// The size of the sequence determines the candidate's family: four
    /// octets are an IPv4 address, sixteen an IPv6 address. Any other
    /// size fails with [`SizeError`] – unlike a family mismatch, it
    /// cannot be answered as "not a member" since the sequence does not
    /// describe an address at all.
    pub fn matches_bytes(self, octets: &[u8]) -> Result<bool, SizeError> {
        Addr::try_from(octets).map(|addr| self.matches_addr(addr))
    }

    /// Returns whether the address given as a sequence of 16 bit
    /// segments falls inside the block.
    ///
    /// Only a sequence of exactly eight segments describes an address;
    /// any other size fails with [`SizeError`].
    pub fn matches_segments(
        self,
        segments: &[u16],
    ) -> Result<bool, SizeError> {
        Addr::try_from(segments).map(|addr| self.matches_addr(addr))
    }

    fn matches_addr(self, addr: Addr) -> bool {
        if addr.family() != self.family() {
            return false;
        }
        addr.masked(self.prefix) == self.network
    }
}

//--- FromStr

impl FromStr for Netmask {
    type Err = ParseNetmaskError;

    /// Parses a netmask from a `address/prefix` spec.
    ///
    /// The address part has to be an address literal. Resolving a
    /// hostname spec needs the resolver from the
    #[cfg_attr(feature = "resolv", doc = "[`resolv`][crate::resolv]")]
    #[cfg_attr(not(feature = "resolv"), doc = "`resolv`")]
    /// module.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = split_spec(s)?;
        let addr = parser::parse_addr(addr)?;
        Self::from_parts(addr, prefix)
    }
}

//--- Display

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Netmask {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            use serde::ser::SerializeTuple;

            let mut serializer = serializer.serialize_tuple(2)?;
            serializer.serialize_element(&self.network)?;
            serializer.serialize_element(&self.prefix)?;
            serializer.end()
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Netmask {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct ReadableVisitor;

        impl<'de> serde::de::Visitor<'de> for ReadableVisitor {
            type Value = Netmask;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a CIDR network block")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Netmask::from_str(v).map_err(E::custom)
            }
        }

        struct CompactVisitor;

        impl<'de> serde::de::Visitor<'de> for CompactVisitor {
            type Value = Netmask;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a CIDR network block")
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                use serde::de::Error;

                let network: Addr = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(0, &self))?;
                let prefix: u8 = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(1, &self))?;
                Netmask::new(network, prefix).map_err(A::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(ReadableVisitor)
        } else {
            deserializer.deserialize_tuple(2, CompactVisitor)
        }
    }
}

//------------ Helper Functions ----------------------------------------------

/// Splits a spec into its address part and its prefix length.
///
/// The spec has to consist of exactly two non-empty parts separated by a
/// single slash, with the second part consisting of decimal digits only.
/// The range of the prefix is checked later, against the family of the
/// resolved address.
pub(crate) fn split_spec(
    spec: &str,
) -> Result<(&str, u32), ParseNetmaskError> {
    let (addr, prefix) = spec
        .split_once('/')
        .ok_or(ParseNetmaskError::InvalidFormat)?;
    if addr.is_empty() || prefix.is_empty() || prefix.contains('/') {
        return Err(ParseNetmaskError::InvalidFormat);
    }
    if !prefix.bytes().all(|ch| ch.is_ascii_digit()) {
        return Err(ParseNetmaskError::InvalidFormat);
    }
    // All digits but too large for a u32 cannot be a valid prefix for
    // either family.
    let prefix = u32::from_str(prefix)
        .map_err(|_| ParseNetmaskError::InvalidPrefixLength)?;
    Ok((addr, prefix))
}

//============ Error Types ===================================================

//------------ PrefixError ---------------------------------------------------

/// A prefix length exceeded the width of its address family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrefixError(());

//--- Display and Error

impl fmt::Display for PrefixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("prefix length out of range")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PrefixError {}

//------------ ParseNetmaskError ---------------------------------------------

/// An error happened while creating a netmask from a spec.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseNetmaskError {
    /// The spec was not two non-empty slash-separated parts with a
    /// numerical second part.
    InvalidFormat,

    /// The prefix length exceeded the width of the address family.
    InvalidPrefixLength,

    /// The address part was neither an address literal nor, where
    /// resolution is available, a resolvable hostname.
    InvalidAddress,
}

//--- From

impl From<PrefixError> for ParseNetmaskError {
    fn from(_: PrefixError) -> Self {
        ParseNetmaskError::InvalidPrefixLength
    }
}

impl From<AddrParseError> for ParseNetmaskError {
    fn from(_: AddrParseError) -> Self {
        ParseNetmaskError::InvalidAddress
    }
}

//--- Display and Error

impl fmt::Display for ParseNetmaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseNetmaskError::InvalidFormat => {
                f.write_str("invalid netmask spec")
            }
            ParseNetmaskError::InvalidPrefixLength => {
                f.write_str("prefix length out of range")
            }
            ParseNetmaskError::InvalidAddress => {
                f.write_str("invalid address")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNetmaskError {}

//============ Testing =======================================================

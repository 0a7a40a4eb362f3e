//! The canonical address representation.
//!
//! Every candidate encoding accepted by the crate is normalized into the
//! type [`Addr`] before any masking or comparison happens: a 32 bit
//! integer for IPv4 and a 128 bit integer for IPv6, both in network byte
//! order. The address family is not stored separately – it follows from
//! the variant, so the two can never disagree.
//!
//! Encodings whose family is fixed by their shape convert infallibly via
//! `From`. The variable length sequence encodings determine the family
//! from their size at runtime and convert via `TryFrom`, failing with
//! [`SizeError`] for any size that does not correspond to an address.

use crate::mask::PrefixBits;
use crate::parser;
use core::fmt;
use core::net::{
    IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6,
};
use core::str::FromStr;

//------------ Family --------------------------------------------------------

/// The address family of an [`Addr`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Family {
    /// The 32 bit IPv4 address space.
    Ipv4,

    /// The 128 bit IPv6 address space.
    Ipv6,
}

impl Family {
    /// Returns the width of an address of this family in bits.
    pub const fn width(self) -> u8 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
        }
    }
}

//--- Display

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Family::Ipv4 => f.write_str("IPv4"),
            Family::Ipv6 => f.write_str("IPv6"),
        }
    }
}

//------------ Addr ----------------------------------------------------------

/// A network address in canonical integer form.
///
/// The variant determines the address family; the payload holds the
/// address as an unsigned integer of the family's width with the most
/// significant byte first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Addr {
    /// An IPv4 address as a 32 bit integer.
    V4(u32),

    /// An IPv6 address as a 128 bit integer.
    V6(u128),
}

impl Addr {
    /// Returns the address family.
    pub const fn family(self) -> Family {
        match self {
            Addr::V4(_) => Family::Ipv4,
            Addr::V6(_) => Family::Ipv6,
        }
    }

    /// Returns whether the address is an IPv4 address.
    pub const fn is_ipv4(self) -> bool {
        matches!(self, Addr::V4(_))
    }

    /// Returns whether the address is an IPv6 address.
    pub const fn is_ipv6(self) -> bool {
        matches!(self, Addr::V6(_))
    }

    /// Returns the width of the address in bits.
    pub const fn width(self) -> u8 {
        self.family().width()
    }

    /// Returns the address with all bits past `prefix` cleared.
    ///
    /// The caller has to make sure that `prefix` does not exceed the
    /// width of the address.
    pub(crate) fn masked(self, prefix: u8) -> Addr {
        match self {
            Addr::V4(bits) => Addr::V4(bits & u32::prefix_mask(prefix)),
            Addr::V6(bits) => Addr::V6(bits & u128::prefix_mask(prefix)),
        }
    }
}

//--- From

impl From<u32> for Addr {
    fn from(bits: u32) -> Self {
        Addr::V4(bits)
    }
}

impl From<u128> for Addr {
    fn from(bits: u128) -> Self {
        Addr::V6(bits)
    }
}

impl From<[u8; 4]> for Addr {
    fn from(octets: [u8; 4]) -> Self {
        Addr::V4(u32::from_be_bytes(octets))
    }
}

impl From<[u8; 16]> for Addr {
    fn from(octets: [u8; 16]) -> Self {
        Addr::V6(u128::from_be_bytes(octets))
    }
}

impl From<[u16; 8]> for Addr {
    fn from(segments: [u16; 8]) -> Self {
        let mut bits = 0u128;
        for segment in segments {
            bits = (bits << 16) | u128::from(segment);
        }
        Addr::V6(bits)
    }
}

impl From<Ipv4Addr> for Addr {
    fn from(addr: Ipv4Addr) -> Self {
        Addr::V4(u32::from(addr))
    }
}

impl From<Ipv6Addr> for Addr {
    fn from(addr: Ipv6Addr) -> Self {
        Addr::V6(u128::from(addr))
    }
}

impl From<IpAddr> for Addr {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => addr.into(),
            IpAddr::V6(addr) => addr.into(),
        }
    }
}

impl From<SocketAddr> for Addr {
    fn from(addr: SocketAddr) -> Self {
        // Only the address part is relevant, the port is dropped.
        addr.ip().into()
    }
}

impl From<SocketAddrV4> for Addr {
    fn from(addr: SocketAddrV4) -> Self {
        (*addr.ip()).into()
    }
}

impl From<SocketAddrV6> for Addr {
    fn from(addr: SocketAddrV6) -> Self {
        (*addr.ip()).into()
    }
}

impl From<Addr> for IpAddr {
    fn from(addr: Addr) -> Self {
        match addr {
            Addr::V4(bits) => IpAddr::V4(Ipv4Addr::from(bits)),
            Addr::V6(bits) => IpAddr::V6(Ipv6Addr::from(bits)),
        }
    }
}

//--- TryFrom

impl TryFrom<&[u8]> for Addr {
    type Error = SizeError;

    /// Converts a variable length octet sequence into an address.
    ///
    /// The size of the sequence determines the family: four octets make
    /// an IPv4 address, sixteen an IPv6 address. Any other size fails.
    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        if let Ok(octets) = <[u8; 4]>::try_from(octets) {
            Ok(octets.into())
        } else if let Ok(octets) = <[u8; 16]>::try_from(octets) {
            Ok(octets.into())
        } else {
            Err(SizeError(()))
        }
    }
}

impl TryFrom<&[u16]> for Addr {
    type Error = SizeError;

    /// Converts a variable length sequence of 16 bit segments into an
    /// address.
    ///
    /// Only a sequence of exactly eight segments makes an address – an
    /// IPv6 one, since there is no segment-based IPv4 encoding.
    fn try_from(segments: &[u16]) -> Result<Self, Self::Error> {
        <[u16; 8]>::try_from(segments)
            .map(Into::into)
            .map_err(|_| SizeError(()))
    }
}

//--- FromStr

impl FromStr for Addr {
    type Err = parser::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_addr(s)
    }
}

//--- Display

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Addr::V4(bits) => Ipv4Addr::from(bits).fmt(f),
            Addr::V6(bits) => Ipv6Addr::from(bits).fmt(f),
        }
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Addr {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            match *self {
                Addr::V4(bits) => serializer.serialize_newtype_variant(
                    "Addr",
                    0,
                    "V4",
                    &bits.to_be_bytes(),
                ),
                Addr::V6(bits) => serializer.serialize_newtype_variant(
                    "Addr",
                    1,
                    "V6",
                    &bits.to_be_bytes(),
                ),
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Addr {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct ReadableVisitor;

        impl<'de> serde::de::Visitor<'de> for ReadableVisitor {
            type Value = Addr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an IP address")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Addr::from_str(v).map_err(E::custom)
            }
        }

        enum Variant {
            V4,
            V6,
        }

        struct VariantVisitor;

        impl<'de> serde::de::Visitor<'de> for VariantVisitor {
            type Value = Variant;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an address family variant")
            }

            fn visit_u64<E: serde::de::Error>(
                self,
                v: u64,
            ) -> Result<Self::Value, E> {
                match v {
                    0 => Ok(Variant::V4),
                    1 => Ok(Variant::V6),
                    _ => Err(E::custom("unknown address family variant")),
                }
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                match v {
                    "V4" => Ok(Variant::V4),
                    "V6" => Ok(Variant::V6),
                    _ => Err(E::custom("unknown address family variant")),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for Variant {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                deserializer.deserialize_identifier(VariantVisitor)
            }
        }

        struct CompactVisitor;

        impl<'de> serde::de::Visitor<'de> for CompactVisitor {
            type Value = Addr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an IP address")
            }

            fn visit_enum<A: serde::de::EnumAccess<'de>>(
                self,
                data: A,
            ) -> Result<Self::Value, A::Error> {
                use serde::de::VariantAccess;

                match data.variant()? {
                    (Variant::V4, variant) => {
                        variant.newtype_variant::<[u8; 4]>().map(Addr::from)
                    }
                    (Variant::V6, variant) => {
                        variant.newtype_variant::<[u8; 16]>().map(Addr::from)
                    }
                }
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(ReadableVisitor)
        } else {
            deserializer.deserialize_enum(
                "Addr",
                &["V4", "V6"],
                CompactVisitor,
            )
        }
    }
}

//============ Error Types ===================================================

//------------ SizeError -----------------------------------------------------

/// A variable length sequence had a size that fits no address family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeError(());

//--- Display and Error

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("sequence size fits no address family")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SizeError {}

//============ Testing =======================================================

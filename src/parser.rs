//! A private parser for literal IPv4 and IPv6 address text.
//!
//! The crate does its own literal parsing rather than deferring to the
//! std library types so that the accepted grammar is nailed down here:
//! dotted-quad decimal notation for IPv4 and colon-separated hextet
//! notation with at most one `::` zero run for IPv6. Embedded IPv4 tails
//! such as `::ffff:1.2.3.4` are not part of the grammar.

use crate::addr::Addr;
use core::fmt;

/// Parses a literal address of either family.
///
/// Tries the dotted-quad form first and falls back to the hextet form,
/// mirroring the family dispatch of the accepted text encoding.
pub fn parse_addr(text: &str) -> Result<Addr, AddrParseError> {
    if let Ok(bits) = parse_ipv4(text) {
        return Ok(Addr::V4(bits));
    }
    parse_ipv6(text).map(Addr::V6)
}

/// Parses dotted-quad IPv4 text into its canonical 32 bit form.
pub fn parse_ipv4(text: &str) -> Result<u32, AddrParseError> {
    let mut bits = 0u32;
    let mut count = 0;
    for part in text.split('.') {
        if count == 4 {
            return Err(AddrParseError(()));
        }
        bits = (bits << 8) | u32::from(parse_octet(part)?);
        count += 1;
    }
    if count != 4 {
        return Err(AddrParseError(()));
    }
    Ok(bits)
}

/// Parses a single decimal octet.
///
/// Leading zeros are rejected to keep octal-looking notation out of IP
/// strings. See RFC 6943, section 3.1.1.
fn parse_octet(part: &str) -> Result<u8, AddrParseError> {
    if part.is_empty()
        || part.len() > 3
        || (part.len() > 1 && part.starts_with('0'))
        || !part.bytes().all(|ch| ch.is_ascii_digit())
    {
        return Err(AddrParseError(()));
    }
    let value = part.parse::<u16>().map_err(|_| AddrParseError(()))?;
    u8::try_from(value).map_err(|_| AddrParseError(()))
}

/// Parses colon-hextet IPv6 text into its canonical 128 bit form.
///
/// Hextet 0 of the notation ends up in the most significant 16 bits of
/// the result, i.e., network byte order.
pub fn parse_ipv6(text: &str) -> Result<u128, AddrParseError> {
    let mut groups = [0u16; 8];
    match text.split_once("::") {
        Some((head, tail)) => {
            // A second zero-run marker would make the expansion
            // ambiguous.
            if tail.contains("::") {
                return Err(AddrParseError(()));
            }
            let head_count = parse_groups_forward(head, &mut groups)?;
            let tail_count = parse_groups_backward(tail, &mut groups)?;
            // The `::` has to stand in for at least one zero group.
            if head_count + tail_count > 7 {
                return Err(AddrParseError(()));
            }
        }
        None => {
            let count = parse_groups_forward(text, &mut groups)?;
            if count != 8 {
                return Err(AddrParseError(()));
            }
        }
    }
    let mut bits = 0u128;
    for group in groups {
        bits = (bits << 16) | u128::from(group);
    }
    Ok(bits)
}

/// Parses the hextets before a `::`, filling `groups` from the front.
///
/// An empty input contributes no hextets, which covers a leading `::`.
/// Returns the number of hextets read.
fn parse_groups_forward(
    text: &str,
    groups: &mut [u16; 8],
) -> Result<usize, AddrParseError> {
    if text.is_empty() {
        return Ok(0);
    }
    let mut count = 0;
    for part in text.split(':') {
        if count == 8 {
            return Err(AddrParseError(()));
        }
        groups[count] = parse_hextet(part)?;
        count += 1;
    }
    Ok(count)
}

/// Parses the hextets after a `::`, filling `groups` from the back.
fn parse_groups_backward(
    text: &str,
    groups: &mut [u16; 8],
) -> Result<usize, AddrParseError> {
    if text.is_empty() {
        return Ok(0);
    }
    let mut count = 0;
    for part in text.rsplit(':') {
        if count == 8 {
            return Err(AddrParseError(()));
        }
        groups[7 - count] = parse_hextet(part)?;
        count += 1;
    }
    Ok(count)
}

fn parse_hextet(part: &str) -> Result<u16, AddrParseError> {
    if part.is_empty()
        || part.len() > 4
        || !part.bytes().all(|ch| ch.is_ascii_hexdigit())
    {
        return Err(AddrParseError(()));
    }
    u16::from_str_radix(part, 16).map_err(|_| AddrParseError(()))
}

//============ Error Types ===================================================

//------------ AddrParseError ------------------------------------------------

/// Text failed to parse as a literal address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddrParseError(());

//--- Display and Error

impl fmt::Display for AddrParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid address literal")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddrParseError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn good_ipv4() {
        assert_eq!(parse_ipv4("192.168.0.1"), Ok(0xC0A8_0001));
        assert_eq!(parse_ipv4("0.0.0.0"), Ok(0));
        assert_eq!(parse_ipv4("255.255.255.255"), Ok(u32::MAX));
        assert_eq!(parse_ipv4("10.0.200.1"), Ok(0x0A00_C801));
    }

    #[test]
    fn bad_ipv4() {
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("192.168.0").is_err());
        assert!(parse_ipv4("192.168.0.1.5").is_err());
        assert!(parse_ipv4("192.168..1").is_err());
        assert!(parse_ipv4("256.0.0.1").is_err());
        assert!(parse_ipv4("192.168.0.01").is_err());
        assert!(parse_ipv4("1000.0.0.1").is_err());
        assert!(parse_ipv4("a.b.c.d").is_err());
        assert!(parse_ipv4("192.168.0.1 ").is_err());
    }

    #[test]
    fn full_ipv6() {
        assert_eq!(
            parse_ipv6("fe80:0:0:0:0:0:0:1"),
            Ok(0xFE80_0000_0000_0000_0000_0000_0000_0001)
        );
        assert_eq!(
            parse_ipv6("1:2:3:4:5:6:7:8"),
            Ok(0x0001_0002_0003_0004_0005_0006_0007_0008)
        );
        assert_eq!(parse_ipv6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), Ok(u128::MAX));
    }

    #[test]
    fn compressed_ipv6() {
        assert_eq!(
            parse_ipv6("fe80::1"),
            Ok(0xFE80_0000_0000_0000_0000_0000_0000_0001)
        );
        assert_eq!(parse_ipv6("::"), Ok(0));
        assert_eq!(parse_ipv6("::1"), Ok(1));
        assert_eq!(parse_ipv6("1::"), Ok(0x0001_0000_0000_0000_0000_0000_0000_0000));
        assert_eq!(
            parse_ipv6("3fff::"),
            Ok(0x3FFF_0000_0000_0000_0000_0000_0000_0000)
        );
        assert_eq!(
            parse_ipv6("1:2::7:8"),
            Ok(0x0001_0002_0000_0000_0000_0000_0007_0008)
        );
    }

    #[test]
    fn compressed_equals_full() {
        assert_eq!(parse_ipv6("fe80::1"), parse_ipv6("fe80:0:0:0:0:0:0:1"));
        assert_eq!(parse_ipv6("::1"), parse_ipv6("0:0:0:0:0:0:0:1"));
    }

    #[test]
    fn bad_ipv6() {
        assert!(parse_ipv6("").is_err());
        assert!(parse_ipv6("1:2:3:4:5:6:7").is_err());
        assert!(parse_ipv6("1:2:3:4:5:6:7:8:9").is_err());
        assert!(parse_ipv6("1::2::3").is_err());
        assert!(parse_ipv6(":::").is_err());
        assert!(parse_ipv6("12345::").is_err());
        assert!(parse_ipv6("g::1").is_err());
        assert!(parse_ipv6("1:2:3::4:5").is_ok());
    }

    #[test]
    fn compressed_overflow_is_rejected() {
        // A `::` has to stand in for at least one zero group, so seven
        // explicit groups around it already overflow the address.
        assert!(parse_ipv6("1:2:3:4::5:6:7:8").is_err());
        assert!(parse_ipv6("1:2:3:4:5:6:7::8").is_err());
        assert!(parse_ipv6("1::2:3:4:5:6:7:8").is_err());
        assert!(parse_ipv6("1:2:3::4:5:6:7").is_ok());
    }

    #[test]
    fn either_family() {
        assert_eq!(parse_addr("127.0.0.1"), Ok(Addr::V4(0x7F00_0001)));
        assert_eq!(parse_addr("::1"), Ok(Addr::V6(1)));
        assert!(parse_addr("localhost").is_err());
    }
}

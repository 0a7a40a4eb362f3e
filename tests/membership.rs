//! End-to-end membership checks through the public API.

use netmask::{Addr, Netmask};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

#[test]
fn v4_block() {
    let block: Netmask = "192.168.0.0/24".parse().unwrap();
    assert!(block.is_ipv4());
    assert!(block.matches_str("192.168.0.1"));
    assert!(!block.matches_str("192.168.1.0"));
}

#[test]
fn input_host_bits_are_ignored() {
    let block: Netmask = "192.168.0.100/24".parse().unwrap();
    assert_eq!(block.to_string(), "192.168.0.0/24");
    assert!(block.matches_str("192.168.0.254"));
}

#[test]
fn v6_block() {
    let block: Netmask = "3fff::/20".parse().unwrap();
    assert!(block.is_ipv6());
    assert!(block.matches_str("3fff::1"));
    assert!(!block.matches_str("4000::1"));
    assert!(!block.matches_str("3fff:1000::1"));
}

#[test]
fn the_whole_v4_space() {
    let block: Netmask = "0.0.0.0/0".parse().unwrap();
    assert!(block.matches_str("255.255.255.255"));
    assert!(block.matches_str("0.0.0.0"));
    assert!(block.matches_str("203.0.113.7"));
}

#[test]
fn wrong_sized_sequence_is_an_error() {
    let block: Netmask = "192.168.0.0/24".parse().unwrap();
    assert!(block.matches_bytes(&[192, 168, 0]).is_err());
}

#[test]
fn cross_family_is_absorbed() {
    let block: Netmask = "192.168.0.0/24".parse().unwrap();
    assert!(!block.matches_str("fe80::1"));
    assert!(!block.matches(Ipv6Addr::LOCALHOST));
}

#[test]
fn every_encoding_of_one_address_agrees() {
    let block: Netmask = "10.64.0.0/10".parse().unwrap();
    let ip = Ipv4Addr::new(10, 64, 3, 9);

    assert!(block.matches_str("10.64.3.9"));
    assert!(block.matches(u32::from(ip)));
    assert!(block.matches(ip.octets()));
    assert!(block.matches(ip));
    assert!(block.matches(IpAddr::V4(ip)));
    assert!(block.matches(SocketAddr::new(IpAddr::V4(ip), 22)));
    assert_eq!(block.matches_bytes(&ip.octets()), Ok(true));

    let outside = Ipv4Addr::new(10, 128, 3, 9);
    assert!(!block.matches(outside));
    assert_eq!(block.matches_bytes(&outside.octets()), Ok(false));
}

#[test]
fn compressed_and_full_notation_agree() {
    let compressed: Addr = "fe80::1".parse().unwrap();
    let full: Addr = "fe80:0:0:0:0:0:0:1".parse().unwrap();
    assert_eq!(compressed, full);

    let block = Netmask::new(compressed, 128).unwrap();
    assert_eq!(block.addr(), compressed);
    assert!(block.matches(full));
}

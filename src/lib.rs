//! A network block membership library.
//!
//! This crate provides the [`Netmask`] type: an immutable value describing
//! a CIDR network block of either address family that can answer whether a
//! candidate address falls inside the block. Candidates are accepted in a
//! number of encodings – text, socket addresses, raw integers, and both
//! fixed and variable length sequences – and are all normalized into the
//! same canonical integer form, represented by the [`Addr`] type, before
//! the block's prefix mask is applied.
//!
//! ```
//! use netmask::Netmask;
//!
//! let block: Netmask = "192.168.0.0/24".parse().unwrap();
//! assert!(block.matches_str("192.168.0.1"));
//! assert!(!block.matches_str("192.168.1.0"));
//! ```
//!
//! # Modules
//!
//! * [addr] contains the canonical address representation and the
//!   conversions from all accepted candidate encodings, and
//! * [netmask] contains the [`Netmask`] type itself together with its
//!   construction and membership testing.
//!
#![cfg_attr(feature = "resolv", doc = "* [resolv]:")]
#![cfg_attr(not(feature = "resolv"), doc = "* resolv:")]
//!   Hostname resolution for netmask specs whose address part is not an
//!   address literal. Only available with the `resolv` feature.
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `resolv`: enables constructing a [`Netmask`] from a
//!   `hostname/prefix` spec by resolving the hostname through a
//!   `Lookup` implementation. Implies `std`.
//! * `serde`: enables serialization and deserialization of [`Addr`] and
//!   [`Netmask`] via the [serde](https://serde.rs/) crate.
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

pub mod addr;
mod mask;
pub mod netmask;
mod parser;
#[cfg(feature = "resolv")]
#[cfg_attr(docsrs, doc(cfg(feature = "resolv")))]
pub mod resolv;

pub use self::addr::{Addr, Family, SizeError};
pub use self::netmask::{Netmask, ParseNetmaskError, PrefixError};
pub use self::parser::AddrParseError;

//! # ipld-cid
//!
//! Self-describing content identifiers.
//!
//! A [`Cid`] wraps a multihash with a version and a codec tag. Version 0 is
//! the legacy form, a bare sha2-256 multihash written in base58btc (`Qm...`);
//! version 1 prefixes the multihash with varint version and codec and writes
//! the whole thing in multibase. A [`Prefix`] is the shape of a CID without
//! its digest, used to address new data the same way.

#![deny(
  clippy::missing_errors_doc,
  clippy::missing_panics_doc,
  clippy::missing_safety_doc
)]

extern crate alloc;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
#[cfg(test)]
extern crate rand;

mod cid;
pub mod codec;
mod error;
mod prefix;
pub mod varint;
mod version;

#[cfg(any(test, feature = "arb"))]
mod arb;
#[cfg(feature = "serde-codec")]
mod serde_codec;

pub use self::cid::Cid as CidGeneric;
pub use self::codec::{
  CidCodec,
  Codec,
  UnsupportedCodec,
};
pub use self::error::{
  Error,
  Result,
};
pub use self::prefix::Prefix;
pub use self::version::Version;

pub use multibase;
pub use multihash;

/// A Cid that contains a multihash with an allocated size of 512 bits.
///
/// This is the same digest size the default multihash code table has.
///
/// If you need a CID that is generic over its digest size, use [`CidGeneric`] instead.
pub type Cid = CidGeneric<multihash::U64>;

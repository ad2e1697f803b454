//! Codec registries.
//!
//! A CID stores its codec as a bare `u64`. Registries that name those tags
//! live here, at the edge: they turn names into tags when a CID is built and
//! tags back into names when one is shown. Nothing in the binary or text
//! encoding of a CID consults them, so unknown tags round-trip untouched.

use core::{
  convert::TryFrom,
  fmt,
  str::FromStr,
};

use alloc::string::ToString;

use crate::error::Error;

/// A codec tag that is not part of a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedCodec(pub u64);

impl fmt::Display for UnsupportedCodec {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "unsupported codec: {:#x}", self.0)
  }
}

/// A registry of named codec tags.
pub trait Codec:
  Copy
  + Unpin
  + Send
  + Sync
  + 'static
  + Sized
  + TryFrom<u64, Error = UnsupportedCodec>
  + Into<u64> {
  /// The registered name of this codec.
  fn name(&self) -> &'static str;

  /// Looks up a codec by its registered name.
  fn from_name(name: &str) -> Option<Self>;

  /// The `u64` tag stored in a CID.
  fn code(&self) -> u64 { (*self).into() }
}

/// Table of the content codecs commonly found in CIDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CidCodec {
  /// Raw binary.
  Raw,
  /// Protobuf Merkle DAG node. The implied codec of every CIDv0.
  DagProtobuf,
  /// CBOR Merkle DAG node.
  DagCbor,
  /// JSON Merkle DAG node.
  DagJson,
  /// Ethereum block header.
  EthereumBlock,
  /// Ethereum transaction.
  EthereumTx,
  /// Bitcoin block.
  BitcoinBlock,
  /// Bitcoin transaction.
  BitcoinTx,
  /// Zcash block.
  ZcashBlock,
  /// Zcash transaction.
  ZcashTx,
}

static TABLE: [(CidCodec, u64, &str); 10] = [
  (CidCodec::Raw, 0x55, "raw"),
  (CidCodec::DagProtobuf, 0x70, "dag-pb"),
  (CidCodec::DagCbor, 0x71, "dag-cbor"),
  (CidCodec::DagJson, 0x0129, "dag-json"),
  (CidCodec::EthereumBlock, 0x90, "eth-block"),
  (CidCodec::EthereumTx, 0x91, "eth-tx"),
  (CidCodec::BitcoinBlock, 0xb0, "bitcoin-block"),
  (CidCodec::BitcoinTx, 0xb1, "bitcoin-tx"),
  (CidCodec::ZcashBlock, 0xc0, "zcash-block"),
  (CidCodec::ZcashTx, 0xc1, "zcash-tx"),
];

impl CidCodec {
  fn entry(&self) -> &'static (CidCodec, u64, &'static str) {
    // every variant has exactly one row
    &TABLE[*self as usize]
  }
}

impl From<CidCodec> for u64 {
  fn from(codec: CidCodec) -> Self { codec.entry().1 }
}

impl TryFrom<u64> for CidCodec {
  type Error = UnsupportedCodec;

  fn try_from(code: u64) -> core::result::Result<Self, Self::Error> {
    TABLE
      .iter()
      .find(|(_, c, _)| *c == code)
      .map(|(codec, ..)| *codec)
      .ok_or(UnsupportedCodec(code))
  }
}

impl Codec for CidCodec {
  fn name(&self) -> &'static str { self.entry().2 }

  fn from_name(name: &str) -> Option<Self> {
    TABLE.iter().find(|(.., n)| *n == name).map(|(codec, ..)| *codec)
  }
}

impl fmt::Display for CidCodec {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for CidCodec {
  type Err = Error;

  fn from_str(name: &str) -> Result<Self, Self::Err> {
    Self::from_name(name).ok_or_else(|| Error::UnknownCodecName(name.to_string()))
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn table_rows_match_variants() {
    for (i, (codec, code, name)) in TABLE.iter().enumerate() {
      assert_eq!(*codec as usize, i);
      assert_eq!(u64::from(*codec), *code);
      assert_eq!(codec.name(), *name);
      assert_eq!(CidCodec::try_from(*code), Ok(*codec));
      assert_eq!(name.parse::<CidCodec>().unwrap(), *codec);
    }
  }

  #[test]
  fn known_tags() {
    assert_eq!(CidCodec::DagCbor.code(), 0x71);
    assert_eq!(CidCodec::DagProtobuf.code(), 0x70);
    assert_eq!(CidCodec::from_name("dag-json"), Some(CidCodec::DagJson));
    assert_eq!(CidCodec::Raw.to_string(), "raw");
  }

  #[test]
  fn unknown_tags_and_names() {
    assert_eq!(CidCodec::try_from(0x1234), Err(UnsupportedCodec(0x1234)));
    assert_eq!(CidCodec::try_from(1 << 63), Err(UnsupportedCodec(1 << 63)));
    assert!(matches!(
      "cbor".parse::<CidCodec>(),
      Err(Error::UnknownCodecName(name)) if name == "cbor"
    ));
  }
}

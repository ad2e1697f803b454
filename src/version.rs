use core::convert::TryFrom;

use crate::error::{
  Error,
  Result,
};

/// Length of a base58btc CIDv0 string holding a sha2-256 multihash.
const V0_STR_LEN: usize = 46;
/// Length of a binary CIDv0: sha2-256 code, digest length, 32 digest bytes.
const V0_BIN_LEN: usize = 34;
/// sha2-256 multihash header: code `0x12`, length `0x20`.
const V0_BIN_HEADER: [u8; 2] = [0x12, 0x20];

/// The version of the CID.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Ord, PartialOrd, Hash)]
pub enum Version {
  /// CID version 0. A bare sha2-256 multihash with an implied dag-pb codec.
  V0,
  /// CID version 1.
  V1,
}

impl Version {
  /// Check if the version of `data` string is CIDv0.
  ///
  /// This is a length and prefix heuristic, not a checksum: any 46 character
  /// string starting with `Qm` is taken to be a base58btc sha2-256 multihash.
  pub fn is_v0_str(data: &str) -> bool {
    data.len() == V0_STR_LEN && data.starts_with("Qm")
  }

  /// Check if the version of `data` bytes is CIDv0.
  pub fn is_v0_binary(data: &[u8]) -> bool {
    data.len() == V0_BIN_LEN && data[..2] == V0_BIN_HEADER
  }
}

/// Convert a number to the matching version, or `Error` if no valid version
/// is matching.
impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> {
    match raw {
      0 => Ok(Self::V0),
      1 => Ok(Self::V1),
      _ => Err(Error::InvalidVersion(raw)),
    }
  }
}

impl From<Version> for u64 {
  fn from(ver: Version) -> u64 {
    match ver {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

use core::convert::TryFrom;

use alloc::vec::Vec;
use bytecursor::ByteCursor;
use multihash::{
  Code,
  Multihash,
  MultihashDigest,
  Size,
};

use crate::{
  cid::Cid as CidGeneric,
  error::{
    Error,
    Result,
  },
  varint,
  version::Version,
  Cid,
};

/// Prefix represents all metadata of a CID, without the actual content.
///
/// The version is kept as read from the wire and only checked when a CID is
/// built from it.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde-codec", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde-codec", derive(serde::Serialize))]
pub struct Prefix {
  /// The version of CID.
  pub version: u64,
  /// The codec of CID.
  pub codec: u64,
  /// The multihash type of CID.
  pub mh_type: u64,
  /// The multihash length of CID.
  pub mh_len: u64,
}

impl Prefix {
  /// Create a prefix from its four fields.
  pub fn new(version: u64, codec: u64, mh_type: u64, mh_len: u64) -> Self {
    Self { version, codec, mh_type, mh_len }
  }

  /// Create a new prefix from encoded bytes. Bytes after the four varints
  /// are ignored.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `data` does not start with four valid varints.
  pub fn from_bytes(data: &[u8]) -> Result<Self> {
    Self::read_bytes(&mut ByteCursor::new(data.to_vec()))
  }

  /// Reads the four varints of a prefix from a byte cursor.
  ///
  /// # Errors
  ///
  /// Will return `Err` if any of the varints is truncated or malformed.
  pub fn read_bytes(r: &mut ByteCursor) -> Result<Self> {
    let version = varint::read_u64(r)?;
    let codec = varint::read_u64(r)?;
    let mh_type = varint::read_u64(r)?;
    let mh_len = varint::read_u64(r)?;
    Ok(Self { version, codec, mh_type, mh_len })
  }

  /// Create a CID out of the prefix and some data that will be hashed.
  ///
  /// The digest is cut down to `mh_len` bytes when the algorithm produces
  /// more.
  ///
  /// A version 0 prefix with any hash but a full sha2-256 builds a CIDv0 that
  /// [`Cid::decode`](crate::CidGeneric::decode) and
  /// [`Cid::cast`](crate::CidGeneric::cast) cannot read back, as with
  /// [`Cid::new_v0`](crate::CidGeneric::new_v0).
  ///
  /// # Errors
  ///
  /// Will return `Err` if the version is neither 0 nor 1, if the hash code is
  /// not in the multihash code table, or if `mh_len` is longer than the
  /// digest.
  pub fn sum(&self, data: &[u8]) -> Result<Cid> {
    let version = Version::try_from(self.version)
      .map_err(|_| Error::UnsupportedVersion(self.version))?;
    let full = Code::try_from(self.mh_type)?.digest(data);
    let available = full.digest().len();
    let len = usize::try_from(self.mh_len)
      .ok()
      .filter(|len| *len <= available)
      .ok_or(Error::InvalidHashLength { requested: self.mh_len, available })?;
    let hash = if len == available {
      full
    }
    else {
      Multihash::wrap(full.code(), &full.digest()[..len])?
    };
    Ok(Cid::new(version, self.codec, hash))
  }

  /// Writes the prefix at the cursor position.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the cursor refuses the write.
  pub fn write_bytes(&self, w: &mut ByteCursor) -> Result<()> {
    varint::write_u64(w, self.version)?;
    varint::write_u64(w, self.codec)?;
    varint::write_u64(w, self.mh_type)?;
    varint::write_u64(w, self.mh_len)
  }

  /// Returns the encoded bytes of the prefix.
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut res = Vec::with_capacity(8);
    varint::push_u64(&mut res, self.version);
    varint::push_u64(&mut res, self.codec);
    varint::push_u64(&mut res, self.mh_type);
    varint::push_u64(&mut res, self.mh_len);
    res
  }
}

impl<S: Size> From<&CidGeneric<S>> for Prefix {
  fn from(cid: &CidGeneric<S>) -> Self {
    Self {
      version: cid.version().into(),
      codec: cid.codec(),
      mh_type: cid.hash().code(),
      mh_len: cid.hash().size().into(),
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::CidCodec;

  const CONTENT: &[u8] = b"this is some test content";

  #[test]
  fn prefix_roundtrip() {
    let hash = Code::Sha2_256.digest(CONTENT);
    let c = Cid::new_v1(CidCodec::DagCbor.into(), hash);
    let pref = c.prefix();
    assert_eq!(pref, Prefix::new(1, 0x71, 0x12, 32));

    let c2 = pref.sum(CONTENT).unwrap();
    assert_eq!(c2, c);

    let pb = pref.to_bytes();
    assert_eq!(pb, vec![0x01, 0x71, 0x12, 0x20]);
    let pref2 = Prefix::from_bytes(&pb).unwrap();
    assert_eq!(pref2, pref);
  }

  #[test]
  fn v0_prefix() {
    let cid = Cid::decode("QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n").unwrap();
    let pref = Prefix::from(&cid);
    assert_eq!(pref, Prefix::new(0, 0x70, 0x12, 32));

    let fresh = pref.sum(CONTENT).unwrap();
    assert_eq!(fresh.version(), Version::V0);
    assert_eq!(fresh, Cid::new_v0(Code::Sha2_256.digest(CONTENT)));
    assert_eq!(fresh.to_string().len(), 46);
  }

  #[test]
  fn v0_prefix_with_other_hash_does_not_read_back() {
    let cid = Prefix::new(0, 0x55, 0x13, 64).sum(b"x").unwrap();
    assert_eq!(cid.version(), Version::V0);
    assert_eq!(cid.codec(), 0x70);
    assert!(Cid::decode(&cid.to_string()).is_err());
    assert!(Cid::cast(&cid.to_bytes()).is_err());
  }

  #[test]
  fn truncated_digest() {
    let full = Code::Sha3_512.digest(b"TEST");
    let short = Multihash::wrap(full.code(), &full.digest()[..4]).unwrap();
    let cid = Cid::new_v1(0x71, short);
    let pref = cid.prefix();
    assert_eq!(pref.mh_len, 4);
    assert_eq!(pref.sum(b"TEST").unwrap(), cid);
    assert_ne!(pref.sum(b"test").unwrap(), cid);
  }

  #[test]
  fn sum_failures() {
    assert!(matches!(
      Prefix::new(2, 0x55, 0x12, 32).sum(CONTENT),
      Err(Error::UnsupportedVersion(2))
    ));
    assert!(matches!(
      Prefix::new(1, 0x55, 0x12, 33).sum(CONTENT),
      Err(Error::InvalidHashLength { requested: 33, available: 32 })
    ));
    assert!(matches!(
      Prefix::new(1, 0x55, 0x7fff_ffff, 32).sum(CONTENT),
      Err(Error::Multihash(_))
    ));
  }

  #[test]
  fn from_bytes_failures() {
    assert!(matches!(Prefix::from_bytes(&[]), Err(Error::VarIntDecode(_))));
    assert!(matches!(
      Prefix::from_bytes(&[0x01, 0x71, 0x12]),
      Err(Error::VarIntDecode(_))
    ));
    // an out of range version still reads; it fails only in `sum`
    let odd = Prefix::from_bytes(&[0x07, 0x71, 0x12, 0x20, 0xff]).unwrap();
    assert_eq!(odd, Prefix::new(7, 0x71, 0x12, 32));
  }

  #[test]
  fn cursor_round_trip() {
    let pref = Prefix::new(1, 1 << 63, 0xb220, 32);
    let mut w = ByteCursor::new(Vec::new());
    pref.write_bytes(&mut w).unwrap();
    assert_eq!(w.get_ref(), &pref.to_bytes());
    w.set_position(0);
    assert_eq!(Prefix::read_bytes(&mut w).unwrap(), pref);
  }

  #[quickcheck]
  fn prefix_bytes_round_trip(pref: Prefix) -> bool {
    Prefix::from_bytes(&pref.to_bytes()).ok() == Some(pref)
  }

  #[quickcheck]
  fn sum_regenerates_cid(data: Vec<u8>, codec: u64, cut: u8) -> bool {
    [Code::Sha2_256, Code::Sha2_512, Code::Sha3_512, Code::Blake2b256, Code::Blake3_256]
      .iter()
      .all(|code| {
        let full = code.digest(&data);
        let len = usize::from(cut) % full.digest().len() + 1;
        let hash = Multihash::wrap(full.code(), &full.digest()[..len]).unwrap();
        let cid = Cid::new_v1(codec, hash);
        cid.prefix().sum(&data).ok() == Some(cid)
      })
  }

  #[quickcheck]
  fn sum_regenerates_v0_cid(data: Vec<u8>) -> bool {
    let cid = Cid::new_v0(Code::Sha2_256.digest(&data));
    cid.prefix().sum(&data).ok() == Some(cid)
  }
}

//! This module contains the main CID type.
//!
//! The type is generic over the allocated size of its multihash. Application
//! code usually wants the concrete top-level `Cid`; code that has to handle
//! digests of any size uses `CidGeneric`.

use core::{
  convert::TryFrom,
  fmt,
  str::FromStr,
};

use alloc::{
  string::{
    String,
    ToString,
  },
  vec::Vec,
};
use bytecursor::ByteCursor;
use multibase::Base;
use multihash::{
  MultihashGeneric as Multihash,
  Size,
};
use tracing::trace;

use crate::{
  codec::{
    Codec,
    UnsupportedCodec,
  },
  error::{
    Error,
    Result,
  },
  prefix::Prefix,
  varint,
  version::Version,
};

/// DAG-PB multicodec code
pub(crate) const DAG_PB: u64 = 0x70;

static IPFS_DELIMETER: &str = "/ipfs/";

/// Representation of a CID.
///
/// The generic is about the allocated size of the multihash.
#[derive(PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
pub struct Cid<S: Size> {
  /// The version of CID.
  version: Version,
  /// The codec of CID.
  codec: u64,
  /// The multihash of CID.
  hash: Multihash<S>,
}

impl<S: Size> Copy for Cid<S> where S::ArrayType: Copy {}

impl<S: Size> Cid<S> {
  /// Create a new CIDv0.
  ///
  /// Only a sha2-256 multihash gives a CIDv0 that can be read back, since
  /// decoding recognises version 0 by the sha2-256 header alone.
  pub fn new_v0(hash: Multihash<S>) -> Self {
    Self { version: Version::V0, codec: DAG_PB, hash }
  }

  /// Create a new CIDv1.
  pub fn new_v1(codec: u64, hash: Multihash<S>) -> Self {
    Self { version: Version::V1, codec, hash }
  }

  /// Create a new CIDv1 with a codec taken from a registry.
  pub fn new_v1_with<C: Codec>(codec: C, hash: Multihash<S>) -> Self {
    Self::new_v1(codec.into(), hash)
  }

  /// Create a new CID. A CIDv0 always carries the dag-pb codec, whatever
  /// `codec` says.
  pub fn new(version: Version, codec: u64, hash: Multihash<S>) -> Self {
    match version {
      Version::V0 => Self::new_v0(hash),
      Version::V1 => Self::new_v1(codec, hash),
    }
  }

  /// Convert a CIDv0 to a CIDv1. A CIDv1 is returned as is.
  pub fn into_v1(self) -> Self {
    match self.version {
      Version::V0 => Self::new_v1(DAG_PB, self.hash),
      Version::V1 => self,
    }
  }

  /// Returns the cid version.
  pub fn version(&self) -> Version { self.version }

  /// Returns the cid codec.
  pub fn codec(&self) -> u64 { self.codec }

  /// Returns the cid codec as an entry of the registry `C`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `C` has no entry for the codec tag.
  pub fn codec_as<C: Codec>(&self) -> core::result::Result<C, UnsupportedCodec> {
    C::try_from(self.codec)
  }

  /// Returns the cid multihash.
  pub fn hash(&self) -> &Multihash<S> { &self.hash }

  /// Returns the version, codec, hash code and hash length of the cid.
  pub fn prefix(&self) -> Prefix { Prefix::from(self) }

  /// Reads one CID from a byte cursor, leaving the cursor after it.
  ///
  /// A version of 0 read from a varint is accepted: the codec that follows is
  /// read and replaced by dag-pb.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the version is neither 0 nor 1, if either varint is
  /// malformed, or if the multihash that follows is malformed.
  pub fn read_bytes(r: &mut ByteCursor) -> Result<Self> {
    let version = Version::try_from(varint::read_u64(r)?)?;
    let codec = varint::read_u64(r)?;
    let (hash, read) = {
      let mut rest = varint::remaining(r);
      let len = rest.len();
      let hash = Multihash::<S>::read(&mut rest)?;
      (hash, len - rest.len())
    };
    r.set_position(r.position() + read as u64);
    Ok(Self::new(version, codec, hash))
  }

  /// Decodes a CID from its binary form.
  ///
  /// A 34 byte buffer starting with the sha2-256 multihash header is a bare
  /// CIDv0; anything else must be `version ++ codec ++ multihash`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the bytes are not exactly one valid CID.
  pub fn cast(data: &[u8]) -> Result<Self> {
    if Version::is_v0_binary(data) {
      trace!("cast: reading 34 byte sha2-256 buffer as cidv0");
      return Ok(Self::new_v0(Multihash::from_bytes(data)?));
    }
    let mut r = ByteCursor::new(data.to_vec());
    let cid = Self::read_bytes(&mut r)?;
    let trailing = varint::remaining(&r).len();
    if trailing != 0 {
      return Err(Error::TrailingBytes(trailing));
    }
    Ok(cid)
  }

  /// Writes the binary form of the CID at the cursor position.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the cursor refuses the write.
  pub fn write_bytes(&self, w: &mut ByteCursor) -> Result<()> {
    w.write_all(&self.to_bytes()).map_err(Error::Cursor)
  }

  /// Returns the encoded bytes of the `Cid`.
  ///
  /// A CIDv0 is its bare multihash; a CIDv1 is
  /// `varint(1) ++ varint(codec) ++ multihash`.
  pub fn to_bytes(&self) -> Vec<u8> {
    match self.version {
      Version::V0 => self.hash.to_bytes(),
      Version::V1 => {
        let hash = self.hash.to_bytes();
        let mut bytes = Vec::with_capacity(20 + hash.len());
        varint::push_u64(&mut bytes, self.version.into());
        varint::push_u64(&mut bytes, self.codec);
        bytes.extend_from_slice(&hash);
        bytes
      }
    }
  }

  fn to_string_v0(&self) -> String {
    Base::Base58Btc.encode(self.hash.to_bytes())
  }

  fn to_string_v1(&self) -> String {
    multibase::encode(Base::Base58Btc, self.to_bytes())
  }

  /// Convert CID into a multibase encoded string
  ///
  /// # Example
  ///
  /// ```
  /// use ipld_cid::Cid;
  /// use multibase::Base;
  /// use multihash::{Code, MultihashDigest};
  ///
  /// const RAW: u64 = 0x55;
  ///
  /// let cid = Cid::new_v1(RAW, Code::Sha2_256.digest(b"foo"));
  /// let encoded = cid.to_string_of_base(Base::Base64).unwrap();
  /// assert_eq!(encoded, "mAVUSICwmtGto/8aP+ZtFPB0wQTQTQi1wZIO/oPmKXohiZueu");
  /// ```
  ///
  /// # Errors
  ///
  /// Will return `Err` if a CIDv0 is asked for any base but base58btc.
  pub fn to_string_of_base(&self, base: Base) -> Result<String> {
    match self.version {
      Version::V0 => {
        if base == Base::Base58Btc {
          Ok(self.to_string_v0())
        }
        else {
          Err(Error::InvalidCidV0Base)
        }
      }
      Version::V1 => Ok(multibase::encode(base, self.to_bytes())),
    }
  }

  /// Decodes a CID from its string form.
  ///
  /// A 46 character string starting with `Qm` is read as a base58btc CIDv0
  /// with no multibase prefix. Anything else is multibase decoded and then
  /// [`cast`](Self::cast).
  ///
  /// # Errors
  ///
  /// Will return `Err` if the string is shorter than 2 characters, is not
  /// valid multibase or base58, or does not hold a valid CID.
  pub fn decode(cid_str: &str) -> Result<Self> {
    if cid_str.chars().nth(1).is_none() {
      return Err(Error::InputTooShort);
    }
    if Version::is_v0_str(cid_str) {
      trace!(cid = cid_str, "decode: reading Qm string as cidv0");
      let bytes = Base::Base58Btc.decode(cid_str)?;
      return Ok(Self::new_v0(Multihash::from_bytes(&bytes)?));
    }
    let (_, bytes) = multibase::decode(cid_str)?;
    Self::cast(&bytes)
  }

  /// Decodes a CID from a string that may be an `/ipfs/` path, in which case
  /// only the text after the first `/ipfs/` is read.
  ///
  /// # Errors
  ///
  /// Will return `Err` on the same inputs as [`decode`](Self::decode).
  pub fn parse(cid_str: &str) -> Result<Self> {
    let hash = match cid_str.find(IPFS_DELIMETER) {
      Some(index) => &cid_str[index + IPFS_DELIMETER.len()..],
      _ => cid_str,
    };
    Self::decode(hash)
  }

  /// The string form of the CID between double quotes, as UTF-8.
  pub fn marshal_json(&self) -> Vec<u8> { format!("\"{}\"", self).into_bytes() }

  /// Reads a CID from its double quoted string form. Exactly one quote is
  /// stripped from each end; there is no escaping. The length check counts
  /// bytes, since the blob is not known to be UTF-8 until the quotes are off
  /// and two quote bytes is the shortest possible wrapping.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the blob is shorter than 2 bytes, is not quoted at
  /// both ends, is not UTF-8, or does not hold a valid CID string.
  pub fn unmarshal_json(blob: &[u8]) -> Result<Self> {
    if blob.len() < 2 {
      return Err(Error::InputTooShort);
    }
    let inner = blob
      .strip_prefix(b"\"")
      .and_then(|b| b.strip_suffix(b"\""))
      .ok_or(Error::InvalidJson)?;
    let cid_str = core::str::from_utf8(inner).map_err(|_| Error::InvalidJson)?;
    Self::decode(cid_str)
  }
}

impl<S: Size> fmt::Display for Cid<S> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let output = match self.version {
      Version::V0 => self.to_string_v0(),
      Version::V1 => self.to_string_v1(),
    };
    write!(f, "{}", output)
  }
}

impl<S: Size> fmt::Debug for Cid<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.debug_struct("Cid")
        .field("version", &self.version())
        .field("codec", &self.codec())
        .field("hash", self.hash())
        .finish()
    }
    else {
      write!(f, "Cid({})", self)
    }
  }
}

impl<S: Size> FromStr for Cid<S> {
  type Err = Error;

  fn from_str(cid_str: &str) -> Result<Self> { Self::parse(cid_str) }
}

impl<S: Size> TryFrom<String> for Cid<S> {
  type Error = Error;

  fn try_from(cid_str: String) -> Result<Self> { Self::parse(&cid_str) }
}

impl<S: Size> TryFrom<&str> for Cid<S> {
  type Error = Error;

  fn try_from(cid_str: &str) -> Result<Self> { Self::parse(cid_str) }
}

impl<S: Size> TryFrom<Vec<u8>> for Cid<S> {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> { Self::cast(&bytes) }
}

impl<S: Size> TryFrom<&[u8]> for Cid<S> {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { Self::cast(bytes) }
}

impl<S: Size> From<Multihash<S>> for Cid<S> {
  fn from(hash: Multihash<S>) -> Self { Self::new_v0(hash) }
}

impl<S: Size> From<&Cid<S>> for Cid<S>
where S::ArrayType: Copy
{
  fn from(cid: &Cid<S>) -> Self { *cid }
}

impl<S: Size> From<Cid<S>> for Vec<u8> {
  fn from(cid: Cid<S>) -> Self { cid.to_bytes() }
}

impl<S: Size> From<Cid<S>> for String {
  fn from(cid: Cid<S>) -> Self { cid.to_string() }
}

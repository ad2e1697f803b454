use alloc::string::String;

use crate::codec::UnsupportedCodec;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Textual input is too short to hold a CID.
  #[error("cid too short")]
  InputTooShort,
  /// A decoded version number is neither 0 nor 1.
  #[error("invalid cid version number: {0}")]
  InvalidVersion(u64),
  /// A prefix carries a version that cannot be turned into a CID.
  #[error("unsupported cid version: {0}")]
  UnsupportedVersion(u64),
  /// CIDv0 has no multibase prefix, so it only exists in base58btc.
  #[error("cidv0 can only be encoded in base58btc")]
  InvalidCidV0Base,
  /// The JSON blob is not a quoted CID string.
  #[error("invalid cid json blob")]
  InvalidJson,
  /// Bytes left over after a complete CID was read.
  #[error("{0} trailing bytes after cid")]
  TrailingBytes(usize),
  /// A prefix asks for a longer digest than its hash algorithm produces.
  #[error("hash length {requested} exceeds digest size {available}")]
  InvalidHashLength {
    /// Length recorded in the prefix.
    requested: u64,
    /// Digest size the algorithm produces.
    available: usize,
  },
  /// The codec tag is not in the requested registry.
  #[error("unsupported codec: {0:#x}")]
  UnsupportedCodec(u64),
  /// The codec name is not in the registry.
  #[error("unknown codec name: {0}")]
  UnknownCodecName(String),
  /// Reading from or writing to a byte cursor failed.
  #[error("cursor error: {0}")]
  Cursor(String),
  /// Varint decoding failed.
  #[error("varint decode error: {0}")]
  VarIntDecode(#[from] unsigned_varint::decode::Error),
  /// Multihash decoding or hashing failed.
  #[error("multihash error: {0}")]
  Multihash(#[from] multihash::Error),
  /// Multibase decoding failed.
  #[error("multibase error: {0}")]
  Multibase(#[from] multibase::Error),
}

impl From<UnsupportedCodec> for Error {
  fn from(err: UnsupportedCodec) -> Self { Error::UnsupportedCodec(err.0) }
}

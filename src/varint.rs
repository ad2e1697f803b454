//! Unsigned varint reading and writing over a [`ByteCursor`].
//!
//! The encoding itself is `unsigned-varint`'s; these helpers only move the
//! cursor. Values cover the full `u64` range, which takes up to 10 bytes.

use bytecursor::ByteCursor;
use unsigned_varint::{
  decode,
  encode as varint_encode,
};

use crate::error::{
  Error,
  Result,
};

/// The bytes of `r` from its current position to the end.
pub(crate) fn remaining(r: &ByteCursor) -> &[u8] {
  let pos = r.position() as usize;
  r.get_ref().get(pos..).unwrap_or(&[])
}

/// Reads a `u64` varint from `r`, advancing past it.
///
/// # Errors
///
/// Will return `Err` if the cursor is exhausted before the last varint byte,
/// if the value overflows a `u64`, or if the encoding is not minimal.
pub fn read_u64(r: &mut ByteCursor) -> Result<u64> {
  let (n, read) = {
    let buf = remaining(r);
    let (n, rest) = decode::u64(buf)?;
    (n, buf.len() - rest.len())
  };
  r.set_position(r.position() + read as u64);
  Ok(n)
}

/// Writes `n` as a varint at the position of `w`.
///
/// # Errors
///
/// Will return `Err` if the cursor refuses the write.
pub fn write_u64(w: &mut ByteCursor, n: u64) -> Result<()> {
  let mut buf = varint_encode::u64_buffer();
  w.write_all(varint_encode::u64(n, &mut buf)).map_err(Error::Cursor)
}

/// Appends `n` as a varint to `out`.
pub(crate) fn push_u64(out: &mut Vec<u8>, n: u64) {
  let mut buf = varint_encode::u64_buffer();
  out.extend_from_slice(varint_encode::u64(n, &mut buf));
}

//! Low-level I/O primitives shared by the parsers.
//!
//! Wii structures are big-endian throughout. Each function reads exactly the
//! bytes it promises or returns an error; a short read surfaces as
//! [`crate::Error::UnexpectedEof`].

use std::io::Read;

use crate::Result;

/// Read one byte.
#[inline]
pub(crate) fn u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)?;
    Ok(b[0])
}

/// Read a big-endian `u16`.
#[inline]
pub(crate) fn be_u16<R: Read>(r: &mut R) -> Result<u16> {
    let mut b = [0u8; 2];
    r.read_exact(&mut b)?;
    Ok(u16::from_be_bytes(b))
}

/// Read a big-endian `u32`.
#[inline]
pub(crate) fn be_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_be_bytes(b))
}

/// Read a big-endian `u64`.
#[inline]
pub(crate) fn be_u64<R: Read>(r: &mut R) -> Result<u64> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b)?;
    Ok(u64::from_be_bytes(b))
}

/// Read exactly `N` bytes into a fixed-size array.
#[inline]
pub(crate) fn bytesa<const N: usize>(r: &mut impl Read) -> Result<[u8; N]> {
    let mut b = [0u8; N];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Discard exactly `len` bytes.
#[inline]
pub(crate) fn skip<R: Read>(r: &mut R, len: u64) -> Result<()> {
    let copied = std::io::copy(&mut r.by_ref().take(len), &mut std::io::sink())?;
    if copied != len {
        return Err(crate::Error::UnexpectedEof);
    }
    Ok(())
}

/// Decode a fixed-width, null-padded string field.
pub(crate) fn null_padded_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

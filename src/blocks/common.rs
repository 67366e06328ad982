// blocks/common.rs
//! Common helpers shared by the OPUS directory walker and block decoders.
//!
//! This module provides:
//! - Bounds-checked little-endian field readers
//! - [`body_range`]: the byte range covered by a directory entry
//! - [`decode_string`]: UTF-8 decoding with a Latin-1 fallback

use super::CHUNK_SIZE;
use crate::{Error, Result};
use core::ops::Range;

// ============================================================================
// Byte Parsing Helpers
// ============================================================================

/// Borrow `N` bytes starting at `offset`, or fail with [`Error::OutOfRange`].
#[inline]
fn field<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N]> {
    let out_of_range = || Error::OutOfRange {
        offset,
        width: N,
        len: bytes.len(),
    };
    let end = offset.checked_add(N).ok_or_else(out_of_range)?;
    let slice = bytes.get(offset..end).ok_or_else(out_of_range)?;
    let mut buf = [0u8; N];
    buf.copy_from_slice(slice);
    Ok(buf)
}

/// Read a u8 from a byte slice at the given offset.
#[inline]
pub fn read_u8(bytes: &[u8], offset: usize) -> Result<u8> {
    Ok(field::<1>(bytes, offset)?[0])
}

/// Read a u16 from a byte slice at the given offset (little-endian).
#[inline]
pub fn read_u16(bytes: &[u8], offset: usize) -> Result<u16> {
    field(bytes, offset).map(u16::from_le_bytes)
}

/// Read a u32 from a byte slice at the given offset (little-endian).
#[inline]
pub fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    field(bytes, offset).map(u32::from_le_bytes)
}

/// Read an i32 from a byte slice at the given offset (little-endian).
#[inline]
pub fn read_i32(bytes: &[u8], offset: usize) -> Result<i32> {
    field(bytes, offset).map(i32::from_le_bytes)
}

/// Read an f32 from a byte slice at the given offset (little-endian).
#[inline]
pub fn read_f32(bytes: &[u8], offset: usize) -> Result<f32> {
    field(bytes, offset).map(f32::from_le_bytes)
}

/// Read an f64 from a byte slice at the given offset (little-endian).
#[inline]
pub fn read_f64(bytes: &[u8], offset: usize) -> Result<f64> {
    field(bytes, offset).map(f64::from_le_bytes)
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that a buffer has at least `expected` bytes.
///
/// Returns `Err(TooShortBuffer)` if the buffer is too small.
#[inline]
pub fn validate_buffer_size(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() < expected {
        return Err(Error::TooShortBuffer {
            actual: bytes.len(),
            expected,
            file: file!(),
            line: line!(),
        });
    }
    Ok(())
}

/// Compute the body range `[offset, offset + 4 * chunk_count)` of a block.
///
/// # Returns
/// The range on success or [`Error::OutOfRange`] when it does not lie inside
/// a buffer of `len` bytes.
pub fn body_range(len: usize, offset: usize, chunk_count: u32) -> Result<Range<usize>> {
    let width = (chunk_count as usize).checked_mul(CHUNK_SIZE);
    let end = width.and_then(|w| offset.checked_add(w));
    match (width, end) {
        (Some(_), Some(end)) if end <= len => Ok(offset..end),
        _ => Err(Error::OutOfRange {
            offset,
            width: width.unwrap_or(usize::MAX),
            len,
        }),
    }
}

// ============================================================================
// String Helpers
// ============================================================================

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid UTF-8.
///
/// Latin-1 maps every byte to the code point of the same value, so this never
/// fails.
pub fn decode_string(bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) => String::from(s),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Strip trailing NUL padding from a byte slice.
#[inline]
pub fn trim_trailing_nuls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_are_little_endian() -> Result<()> {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(read_u8(&bytes, 3)?, 0x04);
        assert_eq!(read_u16(&bytes, 0)?, 0x0201);
        assert_eq!(read_u32(&bytes, 0)?, 0x0403_0201);
        assert_eq!(read_i32(&bytes, 4)?, -1);
        Ok(())
    }

    #[test]
    fn float_readers() -> Result<()> {
        let mut bytes = vec![0u8; 2];
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-2.25f64).to_le_bytes());
        assert_eq!(read_f32(&bytes, 2)?, 1.5);
        assert_eq!(read_f64(&bytes, 6)?, -2.25);
        Ok(())
    }

    #[test]
    fn read_past_end_is_out_of_range() {
        let bytes = [0u8; 6];
        assert_eq!(
            read_u32(&bytes, 3),
            Err(Error::OutOfRange {
                offset: 3,
                width: 4,
                len: 6
            })
        );
        assert!(read_u8(&bytes, 6).is_err());
        assert!(read_f64(&bytes, usize::MAX).is_err());
        // Exactly at the end is fine.
        assert!(read_u16(&bytes, 4).is_ok());
    }

    #[test]
    fn body_range_bounds() {
        assert_eq!(body_range(16, 8, 2), Ok(8..16));
        assert!(body_range(15, 8, 2).is_err());
        assert!(body_range(16, usize::MAX, 1).is_err());
        assert_eq!(body_range(8, 8, 0), Ok(8..8));
    }

    #[test]
    fn decode_string_falls_back_to_latin1() {
        assert_eq!(decode_string("Grüße".as_bytes()), "Grüße");
        // 0xE9 alone is invalid UTF-8, but is 'é' in Latin-1.
        assert_eq!(decode_string(&[b'c', b'a', b'f', 0xE9]), "café");
    }

    #[test]
    fn trims_only_trailing_nuls() {
        assert_eq!(trim_trailing_nuls(b"\0a\0b\0\0"), b"\0a\0b");
        assert_eq!(trim_trailing_nuls(b"\0\0"), b"");
        assert_eq!(trim_trailing_nuls(b""), b"");
    }
}

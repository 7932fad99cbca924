//! The CRC-32 used to checksum each chunk.
//!
//! PNG uses the reflected CRC-32 with polynomial `0xEDB88320`. The per-byte
//! update goes through a 256-entry table built at compile time, so hashing
//! is a single table lookup per byte no matter how large the chunk data is.

use crate::error::PngError;

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c = c >> 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// CRC-32 of the bytes produced by the iterator.
///
/// The iterator form lets a caller hash a chunk's type tag and data together
/// without having to copy them into one buffer first.
#[inline]
#[must_use]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}

/// CRC-32 of a byte slice.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  png_crc(bytes.iter().copied())
}

/// Checks bytes against a declared CRC value.
///
/// For a PNG chunk the bytes covered are the 4 type tag bytes followed by
/// the data bytes. Gives `Some(ChecksumMismatch)` when they disagree, `None`
/// when the declared value holds.
#[inline]
#[must_use]
pub fn validate_crc(iter: impl Iterator<Item = u8>, declared_crc: u32) -> Option<PngError> {
  if png_crc(iter) != declared_crc {
    Some(PngError::ChecksumMismatch)
  } else {
    None
  }
}

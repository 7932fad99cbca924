//! Structure checks for a chunk stream as a whole.
//!
//! Each check is a pure predicate that hands back `Some(error)` or `None`
//! and never panics. Policy about what to do with a failed check lives with
//! the caller, see [`png_extract_chunks`](crate::png_extract_chunks).

use crate::chunk::{PngChunk, PngChunkType};
use crate::error::PngError;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Do the first 8 bytes of the buffer carry the PNG signature?
///
/// Buffers shorter than the signature can't match and so fail too.
#[inline]
#[must_use]
pub fn validate_signature(bytes: &[u8]) -> Option<PngError> {
  match bytes {
    [137, 80, 78, 71, 13, 10, 26, 10, ..] => None,
    _ => Some(PngError::InvalidSignature),
  }
}

/// Is this chunk a valid stream opener?
///
/// The first chunk must be an `IHDR` chunk carrying exactly 13 data bytes.
#[inline]
#[must_use]
pub fn validate_first_chunk(chunk: PngChunk<'_>) -> Option<PngError> {
  if chunk.ty() != PngChunkType::IHDR || chunk.data().len() != 13 {
    Some(PngError::InvalidFirstChunk)
  } else {
    None
  }
}

/// Is this chunk a valid stream trailer?
///
/// The last chunk must be an `IEND` chunk with no data at all.
#[inline]
#[must_use]
pub fn validate_last_chunk(chunk: PngChunk<'_>) -> Option<PngError> {
  if chunk.ty() != PngChunkType::IEND || !chunk.data().is_empty() {
    Some(PngError::InvalidLastChunk)
  } else {
    None
  }
}

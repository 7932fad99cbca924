//! The chunk record and the iterator that walks a chunk stream.

use core::fmt::{Debug, Write};

use crate::crc32::png_crc;
use crate::error::PngError;
use crate::try_split_off_byte_array;

/// A PNG chunk's type tag.
///
/// On the wire this is 4 ASCII bytes, and the value held here is the
/// big-endian `u32` interpretation of those bytes. Uppercase/lowercase of
/// each tag byte carries one of the chunk property bits, see the `is_`
/// methods.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub u32);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// `IHDR`, the image header. Always first, always 13 data bytes. (decimal
  /// 1229472850)
  pub const IHDR: Self = Self(u32::from_be_bytes(*b"IHDR"));
  /// `PLTE`, the palette.
  pub const PLTE: Self = Self(u32::from_be_bytes(*b"PLTE"));
  /// `IDAT`, compressed image data.
  pub const IDAT: Self = Self(u32::from_be_bytes(*b"IDAT"));
  /// `IEND`, the stream trailer. Always last, always empty. (decimal
  /// 1229278788)
  pub const IEND: Self = Self(u32::from_be_bytes(*b"IEND"));
  /// `tEXt`, an uncompressed keyword/value text pair.
  pub const tEXt: Self = Self(u32::from_be_bytes(*b"tEXt"));

  /// The 4 tag bytes, in stream order.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0.to_be_bytes()
  }

  /// Ancillary chunks (bit 5 of the first tag byte set) can be skipped by a
  /// decoder that doesn't understand them; critical chunks can't.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.to_bytes()[0] & 32) != 0
  }
  /// Private chunks (bit 5 of the second tag byte set) are application
  /// specific rather than spec defined.
  #[inline]
  #[must_use]
  pub const fn is_private(self) -> bool {
    (self.to_bytes()[1] & 32) != 0
  }
  /// Safe-to-copy chunks (bit 5 of the fourth tag byte set) survive stream
  /// edits made by software that doesn't recognize them.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.to_bytes()[3] & 32) != 0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for b in self.to_bytes() {
      f.write_char(b as char)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  #[must_use]
  fn from(tag: [u8; 4]) -> Self {
    Self(u32::from_be_bytes(tag))
  }
}

/// One chunk out of a PNG datastream.
///
/// The data is borrowed from the source buffer, so a chunk can't outlive the
/// bytes it was cut from. The data slice length is exactly the length field
/// that was read from the stream.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngChunk<'b> {
  pub(crate) ty: PngChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl<'b> PngChunk<'b> {
  /// The chunk's type tag.
  #[inline]
  #[must_use]
  pub const fn ty(self) -> PngChunkType {
    self.ty
  }
  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub const fn data(self) -> &'b [u8] {
    self.data
  }
  /// The CRC value the stream declared for this chunk.
  #[inline]
  #[must_use]
  pub const fn declared_crc(self) -> u32 {
    self.declared_crc
  }
  /// Recomputes the chunk's CRC over its type tag and data.
  #[inline]
  #[must_use]
  pub fn compute_crc(self) -> u32 {
    png_crc(self.ty.to_bytes().into_iter().chain(self.data.iter().copied()))
  }
  /// Does the declared CRC match the recomputed one?
  #[inline]
  #[must_use]
  pub fn crc_is_valid(self) -> bool {
    self.compute_crc() == self.declared_crc
  }
}
impl Debug for PngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive chunks from PNG bytes.
///
/// This does no validation at all beyond staying inside the buffer: the
/// signature bytes are skipped unchecked, and declared CRC values are
/// carried through without being recomputed. If a record runs off the end
/// of the buffer the iterator produces one
/// [`TruncatedStream`](PngError::TruncatedStream) and is then exhausted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunkIter<'b> {
  spare: &'b [u8],
  truncated: bool,
}
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will step over the 8-byte signature
  /// automatically.
  ///
  /// A buffer shorter than the signature itself counts as truncated.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, spare @ ..] => Self { spare, truncated: false },
      _ => Self { spare: &[], truncated: true },
    }
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = Result<PngChunk<'b>, PngError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      if self.truncated {
        self.truncated = false;
        return Some(Err(PngError::TruncatedStream));
      }
      return None;
    }
    match take_chunk(self.spare) {
      Ok((chunk, rest)) => {
        self.spare = rest;
        Some(Ok(chunk))
      }
      Err(e) => {
        self.spare = &[];
        Some(Err(e))
      }
    }
  }
}

/// Cuts one full chunk record off the front of `bytes`.
fn take_chunk(bytes: &[u8]) -> Result<(PngChunk<'_>, &[u8]), PngError> {
  let (len_bytes, rest) =
    try_split_off_byte_array::<4>(bytes).ok_or(PngError::TruncatedStream)?;
  let len = u32::from_be_bytes(len_bytes) as usize;
  let (ty_bytes, rest) = try_split_off_byte_array::<4>(rest).ok_or(PngError::TruncatedStream)?;
  if rest.len() < len {
    return Err(PngError::TruncatedStream);
  }
  let (data, rest) = rest.split_at(len);
  let (crc_bytes, rest) = try_split_off_byte_array::<4>(rest).ok_or(PngError::TruncatedStream)?;
  let chunk = PngChunk {
    ty: PngChunkType::from(ty_bytes),
    data,
    declared_crc: u32::from_be_bytes(crc_bytes),
  };
  Ok((chunk, rest))
}

//! The error type for everything that can go wrong with a chunk stream.

/// An error from parsing a PNG chunk stream.
///
/// Validation helpers hand one of these back as a plain value and never
/// panic. Whether a given error actually stops an extraction depends on the
/// [`PngParseOptions`](crate::PngParseOptions) in effect, with the exception
/// of [`TruncatedStream`](Self::TruncatedStream), which always does: past
/// that point the buffer can't be trusted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum PngError {
  /// The first 8 bytes were not the PNG signature.
  InvalidSignature,

  /// The first chunk was not an `IHDR` chunk with 13 bytes of data.
  InvalidFirstChunk,

  /// The last chunk was not an empty `IEND` chunk.
  InvalidLastChunk,

  /// A chunk's declared CRC didn't match the CRC of its type and data.
  ChecksumMismatch,

  /// A length field or the buffer itself ran out before a full record could
  /// be read.
  TruncatedStream,
}
impl core::fmt::Display for PngError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::InvalidSignature => "incorrect PNG signature",
      Self::InvalidFirstChunk => "invalid IHDR chunk",
      Self::InvalidLastChunk => "invalid IEND chunk",
      Self::ChecksumMismatch => "invalid chunk CRC",
      Self::TruncatedStream => "unexpected end of input",
    })
  }
}
impl core::error::Error for PngError {}

/// Alias for a `Result` with [`PngError`] as the error type.
pub type PngResult<T> = Result<T, PngError>;

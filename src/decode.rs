//! One-pass extraction of a whole chunk stream into an owned collection.

use alloc::vec;
use alloc::vec::Vec;

use log::{error, warn};

use crate::chunk::{PngChunk, PngChunkType, PngRawChunkIter};
use crate::crc32::validate_crc;
use crate::error::{PngError, PngResult};
use crate::validate::{validate_first_chunk, validate_last_chunk, validate_signature};

/// What [`png_extract_chunks`] should do when a chunk fails its CRC check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationFailurePolicy {
  /// Stop the whole extraction and hand back the error.
  Abort,
  /// Leave the bad chunk out of the results and keep going at the next
  /// chunk boundary.
  ///
  /// Only a CRC mismatch can be skipped this way. Structure failures and
  /// truncation still abort, there's no chunk to substitute for those.
  SkipChunk,
}

/// Options for [`png_extract_chunks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngParseOptions {
  /// Check the signature before the pass and the first/last chunk rules
  /// after it (first chunk is a 13-byte `IHDR`, last is an empty `IEND`).
  /// Default: `true`.
  pub validate_structure: bool,
  /// Recompute each chunk's CRC over its type tag and data and compare it
  /// against the declared value. Default: `false`.
  pub validate_checksums: bool,
  /// What a failed CRC check does. Default: [`Abort`](ValidationFailurePolicy::Abort).
  pub on_validation_failure: ValidationFailurePolicy,
  /// Report failures through the `log` crate, whether or not they end up
  /// fatal. Logging and fatality are independent of each other. Default:
  /// `true`.
  pub log_failures: bool,
}
impl Default for PngParseOptions {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self {
      validate_structure: true,
      validate_checksums: false,
      on_validation_failure: ValidationFailurePolicy::Abort,
      log_failures: true,
    }
  }
}

/// All the chunks of one PNG datastream.
///
/// Holds the chunks twice over: once in stream appearance order, and once
/// grouped by type tag. Buckets appear in first-seen order and each bucket
/// keeps its chunks in appearance order, so the two views always agree. The
/// chunks borrow their data from the parsed buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngChunks<'b> {
  in_order: Vec<PngChunk<'b>>,
  by_type: Vec<(PngChunkType, Vec<PngChunk<'b>>)>,
}
impl<'b> PngChunks<'b> {
  /// The chunks in stream appearance order.
  #[inline]
  #[must_use]
  pub fn in_order(&self) -> &[PngChunk<'b>] {
    &self.in_order
  }
  /// The chunks grouped by type tag, buckets in first-seen order.
  #[inline]
  #[must_use]
  pub fn by_type(&self) -> &[(PngChunkType, Vec<PngChunk<'b>>)] {
    &self.by_type
  }
  /// All chunks carrying the given type tag, in appearance order.
  ///
  /// Empty when the tag never appeared.
  #[inline]
  #[must_use]
  pub fn chunks_of_type(&self, ty: PngChunkType) -> &[PngChunk<'b>] {
    self
      .by_type
      .iter()
      .find(|(bucket_ty, _)| *bucket_ty == ty)
      .map(|(_, bucket)| bucket.as_slice())
      .unwrap_or(&[])
  }
  /// How many chunks were extracted.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.in_order.len()
  }
  /// Were zero chunks extracted?
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.in_order.is_empty()
  }

  fn push(&mut self, chunk: PngChunk<'b>) {
    self.in_order.push(chunk);
    match self.by_type.iter_mut().find(|(ty, _)| *ty == chunk.ty()) {
      Some((_, bucket)) => bucket.push(chunk),
      None => self.by_type.push((chunk.ty(), vec![chunk])),
    }
  }
}

/// Walks a full PNG datastream and collects every chunk.
///
/// This is a single pass over the buffer: each chunk record is cut out,
/// optionally CRC-checked, and recorded both in order and under its type
/// tag. What gets validated, and what a failed validation does, comes from
/// the `options`, see [`PngParseOptions`] for the field by field story.
///
/// ## Failure
/// On a fatal validation failure nothing is handed back, not even the
/// chunks that were already collected. A
/// [`TruncatedStream`](PngError::TruncatedStream) is always fatal. With
/// `validate_structure` on, a stream with no chunks at all fails the
/// first-chunk rule.
pub fn png_extract_chunks<'b>(
  png: &'b [u8], options: PngParseOptions,
) -> PngResult<PngChunks<'b>> {
  if options.validate_structure {
    if let Some(e) = validate_signature(png) {
      return Err(fatal(e, options));
    }
  }
  let mut out = PngChunks::default();
  for it in PngRawChunkIter::new(png) {
    let chunk = match it {
      Ok(chunk) => chunk,
      Err(e) => return Err(fatal(e, options)),
    };
    if options.validate_checksums {
      let bytes = chunk.ty().to_bytes().into_iter().chain(chunk.data().iter().copied());
      if let Some(e) = validate_crc(bytes, chunk.declared_crc()) {
        match options.on_validation_failure {
          ValidationFailurePolicy::Abort => return Err(fatal(e, options)),
          ValidationFailurePolicy::SkipChunk => {
            if options.log_failures {
              warn!("skipping {:?} chunk: {e}", chunk.ty());
            }
            continue;
          }
        }
      }
    }
    out.push(chunk);
  }
  if options.validate_structure {
    // these two can't be skipped, there's no record to drop in their place.
    match out.in_order().first() {
      Some(first) => {
        if let Some(e) = validate_first_chunk(*first) {
          return Err(fatal(e, options));
        }
      }
      None => return Err(fatal(PngError::InvalidFirstChunk, options)),
    }
    if let Some(last) = out.in_order().last() {
      if let Some(e) = validate_last_chunk(*last) {
        return Err(fatal(e, options));
      }
    }
  }
  Ok(out)
}

fn fatal(e: PngError, options: PngParseOptions) -> PngError {
  if options.log_failures {
    error!("chunk extraction failed: {e}");
  }
  e
}
